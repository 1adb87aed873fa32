use futures::StreamExt;
use tokio::io::BufReader;

use crate::lines::byte_lines;
use crate::{LogSource, RawLines, SourceError};

/// Reads piped log lines from standard input until EOF
#[derive(Clone, Debug, Default)]
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

impl LogSource for StdinSource {
    async fn open(&self, _target: &str, tail: usize) -> Result<RawLines, SourceError> {
        if tail > 0 {
            tracing::debug!(tail, "tail hint ignored for stdin");
        }
        Ok(byte_lines(BufReader::new(tokio::io::stdin())).boxed())
    }

    fn name(&self) -> &'static str {
        "stdin"
    }
}
