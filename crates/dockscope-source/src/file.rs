use futures::StreamExt;
use tokio::io::BufReader;

use crate::lines::{byte_lines, split_lines};
use crate::{LogSource, RawLines, SourceError};

/// Reads a log file from disk.
///
/// The file is read once to its end; it is not followed.
#[derive(Clone, Debug, Default)]
pub struct FileSource;

impl FileSource {
    pub fn new() -> Self {
        Self
    }
}

impl LogSource for FileSource {
    async fn open(&self, target: &str, tail: usize) -> Result<RawLines, SourceError> {
        if tail > 0 {
            let data = tokio::fs::read(target)
                .await
                .map_err(|e| SourceError::unavailable(target, e.to_string()))?;
            let lines = split_lines(&data);
            let start = lines.len().saturating_sub(tail);
            tracing::debug!(path = target, total = lines.len(), tail, "read log file");
            let tail_lines: Vec<_> = lines.into_iter().skip(start).map(Ok).collect();
            return Ok(futures::stream::iter(tail_lines).boxed());
        }

        let file = tokio::fs::File::open(target)
            .await
            .map_err(|e| SourceError::unavailable(target, e.to_string()))?;
        Ok(byte_lines(BufReader::new(file)).boxed())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("dockscope_{}_{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    async fn collect(source: &FileSource, target: &str, tail: usize) -> Vec<String> {
        source
            .open(target, tail)
            .await
            .unwrap()
            .map(|line| String::from_utf8(line.unwrap()).unwrap())
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_reads_all_lines() {
        let path = write_temp("all.log", "one\ntwo\nthree\n");
        let lines = collect(&FileSource::new(), path.to_str().unwrap(), 0).await;
        assert_eq!(lines, vec!["one", "two", "three"]);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_tail_hint_limits_history() {
        let path = write_temp("tail.log", "one\ntwo\nthree\nfour\n");
        let lines = collect(&FileSource::new(), path.to_str().unwrap(), 2).await;
        assert_eq!(lines, vec!["three", "four"]);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let err = match FileSource::new().open("/nonexistent/dockscope.log", 0).await {
            Ok(_) => panic!("missing file should not open"),
            Err(e) => e,
        };
        assert!(err.is_unavailable());
    }
}
