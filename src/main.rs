mod cli;
mod config;
mod logging;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use dockscope_logs::{LogPump, PumpEvent};
use dockscope_source::LogSource;
use dockscope_tui::{
    Action, AppState, Event, EventHandler, KeyBindings, KeyContext, LogViewerScreen, Tui,
    ViewportState,
};

use crate::cli::Args;
use crate::config::ResolvedConfig;

/// Pump events applied before the next redraw
const MAX_EVENTS_PER_FRAME: usize = 1024;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(Some(info)) => {
            println!("{info}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<Option<String>> {
    let file = config::load_config_with_precedence(args.config.clone(), config::env_config_path())?;
    let config = config::resolve(&args, file);

    logging::init(config.log_file.as_deref())?;

    run_app(config).await
}

/// Run one viewer session, returning the completion message, if any
async fn run_app(config: ResolvedConfig) -> Result<Option<String>> {
    let cancel = CancellationToken::new();

    // External interrupt stops both the pump and the loop
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let source = config.log_source();
    info!(target_id = %config.target, source = source.name(), tail = config.tail, "starting session");
    let (mut pump, mut pump_rx) = LogPump::spawn(
        source,
        config.target.clone(),
        config.tail,
        cancel.child_token(),
    );

    let mut tui = Tui::new().context("failed to initialize terminal")?;
    let (width, height) = tui.size();
    let viewport = ViewportState::new(width, height)
        .with_wrap(config.wrap)
        .with_errors_only(config.errors_only);
    let mut state = AppState::new(config.target.clone(), config.tail, viewport);

    let mut events = EventHandler::new(config.tick_rate, &cancel);
    let keybindings = KeyBindings::new();

    let loop_result = event_loop(
        &mut tui,
        &mut state,
        &mut events,
        &keybindings,
        &mut pump_rx,
        &cancel,
    )
    .await;

    pump.stop();
    events.shutdown();
    tui.restore().context("failed to restore terminal")?;
    loop_result?;

    info!(records = state.buffer.len(), "session ended");

    if let Some(reason) = state.abort_reason() {
        anyhow::bail!("cannot show logs for {}: {reason}", config.target);
    }

    Ok(state.info.take())
}

async fn event_loop(
    tui: &mut Tui,
    state: &mut AppState,
    events: &mut EventHandler,
    keybindings: &KeyBindings,
    pump_rx: &mut mpsc::UnboundedReceiver<PumpEvent>,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut pump_open = true;

    loop {
        if state.should_quit {
            return Ok(());
        }

        tui.terminal()
            .draw(|frame| LogViewerScreen::render(frame, state))?;

        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),

            Some(event) = events.next() => {
                handle_event(state, keybindings, event);
            }

            received = pump_rx.recv(), if pump_open => {
                match received {
                    Some(event) => {
                        state.apply_pump_event(event);

                        // Drain what is already queued before redrawing
                        for _ in 1..MAX_EVENTS_PER_FRAME {
                            match pump_rx.try_recv() {
                                Ok(event) => state.apply_pump_event(event),
                                Err(_) => break,
                            }
                        }
                    }
                    None => pump_open = false,
                }
            }
        }
    }
}

fn handle_event(state: &mut AppState, keybindings: &KeyBindings, event: Event) {
    match event {
        Event::Key(key) => {
            let context = if state.help_visible {
                KeyContext::Help
            } else {
                KeyContext::LogViewer
            };
            if let Some(action) = keybindings.get_action(context, &key) {
                state.handle_action(&action);
            }
        }
        Event::Resize(width, height) => state.handle_action(&Action::Resize(width, height)),
        // Redraw happens at the top of the loop
        Event::Tick => {}
        Event::Error(e) => warn!(error = %e, "terminal input error"),
    }
}
