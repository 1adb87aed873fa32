use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use dockscope_source::{LogSource, SourceError};
use dockscope_types::LogRecord;

use crate::parser::LogParser;

/// Messages sent from the pump to the viewer
#[derive(Debug)]
pub enum PumpEvent {
    /// A classified record, in source order
    Record(LogRecord),

    /// The source failed. No further records follow.
    Error(SourceError),

    /// The source reached its end
    Completed {
        lines_read: u64,
        source: &'static str,
    },
}

/// Moves lines from a source through the classifier into a channel.
///
/// One background task per pump. Stopping (or dropping) the pump cancels the
/// task, which drops the source stream and closes the channel.
pub struct LogPump {
    /// Cancellation token for the pump task
    cancel: CancellationToken,

    /// Task handle
    task: Option<tokio::task::JoinHandle<()>>,
}

impl LogPump {
    /// Start pumping `target` from `source`.
    ///
    /// The pump stops on its own once the token is cancelled.
    pub fn spawn<S: LogSource>(
        source: S,
        target: String,
        tail: usize,
        cancel: CancellationToken,
    ) -> (Self, mpsc::UnboundedReceiver<PumpEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(source, target, tail, cancel.clone(), tx));

        let pump = Self {
            cancel,
            task: Some(task),
        };
        (pump, rx)
    }

    /// Stop the pump
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for LogPump {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run<S: LogSource>(
    source: S,
    target: String,
    tail: usize,
    cancel: CancellationToken,
    tx: mpsc::UnboundedSender<PumpEvent>,
) {
    let opened = tokio::select! {
        _ = cancel.cancelled() => return,
        opened = source.open(&target, tail) => opened,
    };

    let mut lines = match opened {
        Ok(lines) => lines,
        Err(e) => {
            warn!(source = source.name(), id = %target, error = %e, "failed to open log source");
            let _ = tx.send(PumpEvent::Error(e));
            return;
        }
    };

    let mut lines_read: u64 = 0;

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!(lines_read, "log pump cancelled");
                break;
            }

            next = lines.next() => {
                match next {
                    Some(Ok(line)) => {
                        lines_read += 1;
                        let record = LogParser::classify_bytes(&line);
                        if tx.send(PumpEvent::Record(record)).is_err() {
                            // Viewer is gone
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        warn!(lines_read, error = %e, "log stream read failed");
                        let _ = tx.send(PumpEvent::Error(SourceError::Read(e)));
                        break;
                    }
                    None => {
                        debug!(lines_read, "log stream ended");
                        let _ = tx.send(PumpEvent::Completed {
                            lines_read,
                            source: source.name(),
                        });
                        break;
                    }
                }
            }
        }
    }
}
