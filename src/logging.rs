//! Tracing subscriber initialization.
//!
//! The TUI owns the terminal, so diagnostics go to a file when one is
//! configured and to stderr (warnings only by default) otherwise.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset
const DEFAULT_DIRECTIVE: &str = "warn";

#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create the log directory
    #[error("failed to create log directory {path:?}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Log path without a file name
    #[error("invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    #[error("tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize tracing, writing to `log_file` when given
pub fn init(log_file: Option<&Path>) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let result = match log_file {
        Some(path) => {
            let (directory, file_name) = prepare_log_path(path)?;
            let file_appender = tracing_appender::rolling::never(directory, file_name);

            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(file_appender)
                .with_ansi(false)
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|_| LoggingError::SubscriberAlreadySet)
}

/// Split a log path into its directory and file name, creating the directory
fn prepare_log_path(path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(path.to_path_buf()))?
        .to_string();

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    Ok((directory, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_prepare_creates_directory() {
        let dir = std::env::temp_dir().join("dockscope_test_logs_create");
        let _ = fs::remove_dir_all(&dir);

        let (directory, file_name) = prepare_log_path(&dir.join("nested").join("app.log")).unwrap();
        assert!(directory.exists());
        assert_eq!(file_name, "app.log");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        let (directory, file_name) = prepare_log_path(Path::new("dockscope.log")).unwrap();
        assert_eq!(directory, PathBuf::from("."));
        assert_eq!(file_name, "dockscope.log");
    }

    #[test]
    fn test_path_without_file_name() {
        assert!(matches!(
            prepare_log_path(Path::new("/")),
            Err(LoggingError::InvalidPath(_))
        ));
    }
}
