use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Terminal events
#[derive(Clone, Debug)]
pub enum Event {
    /// Periodic redraw (keeps the fallback clock moving)
    Tick,
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Terminal input failed
    Error(String),
}

/// Reads terminal input on a background task
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// Start reading input. Stops when `parent` is cancelled or on shutdown.
    pub fn new(tick_rate: Duration, parent: &CancellationToken) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let cancel = parent.child_token();

        let task = {
            let cancel = cancel.clone();

            tokio::spawn(async move {
                let mut reader = event::EventStream::new();
                let mut tick_interval = tokio::time::interval(tick_rate);

                loop {
                    let tick = tick_interval.tick();
                    let crossterm_event = reader.next().fuse();

                    tokio::select! {
                        _ = cancel.cancelled() => break,

                        _ = tick => {
                            if sender.send(Event::Tick).is_err() {
                                break;
                            }
                        }

                        maybe_event = crossterm_event => {
                            let event = match maybe_event {
                                // Only presses, Windows also reports releases
                                Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                                    Event::Key(key)
                                }
                                Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                                Some(Ok(_)) => continue,
                                Some(Err(e)) => Event::Error(e.to_string()),
                                None => break,
                            };
                            if sender.send(event).is_err() {
                                break;
                            }
                        }
                    }
                }
            })
        };

        Self {
            receiver,
            cancel,
            task,
        }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Shutdown the event handler
    pub fn shutdown(&self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
