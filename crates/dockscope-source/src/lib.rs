//! Log sources for dockscope
//!
//! A source turns a target identifier into a cancellable, append-only sequence
//! of raw byte lines. Dropping the returned stream releases the underlying
//! resources (for Docker this kills the `docker logs` child process).

mod docker;
mod error;
mod file;
mod lines;
mod stdin;

use std::future::Future;
use std::io;

use futures::stream::BoxStream;

pub use docker::DockerSource;
pub use error::SourceError;
pub use file::FileSource;
pub use stdin::StdinSource;

/// Raw lines as produced by a source, without line terminators
pub type RawLines = BoxStream<'static, io::Result<Vec<u8>>>;

/// A provider of raw log lines
pub trait LogSource: Send + Sync + 'static {
    /// Open the log stream for `target`.
    ///
    /// `tail` is a hint: when non-zero only that many historical lines are
    /// requested, zero means the full history.
    fn open(
        &self,
        target: &str,
        tail: usize,
    ) -> impl Future<Output = Result<RawLines, SourceError>> + Send;

    /// Short human-readable name used in status messages
    fn name(&self) -> &'static str;
}

/// Any of the built-in sources
#[derive(Clone, Debug)]
pub enum Source {
    Docker(DockerSource),
    File(FileSource),
    Stdin(StdinSource),
}

impl LogSource for Source {
    async fn open(&self, target: &str, tail: usize) -> Result<RawLines, SourceError> {
        match self {
            Self::Docker(source) => source.open(target, tail).await,
            Self::File(source) => source.open(target, tail).await,
            Self::Stdin(source) => source.open(target, tail).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Docker(source) => source.name(),
            Self::File(source) => source.name(),
            Self::Stdin(source) => source.name(),
        }
    }
}
