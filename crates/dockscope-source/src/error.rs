use std::io;

use thiserror::Error;

/// Failures raised by log sources
#[derive(Debug, Error)]
pub enum SourceError {
    /// The target does not exist or cannot be opened
    #[error("{target} is unavailable: {reason}")]
    Unavailable { target: String, reason: String },

    /// The helper program could not be executed
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// I/O failure while the stream was being read
    #[error("error reading logs: {0}")]
    Read(#[from] io::Error),
}

impl SourceError {
    pub fn unavailable(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error happened before any line could be read.
    ///
    /// These abort the session instead of leaving the viewer in an error state.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Spawn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(SourceError::unavailable("web", "No such container").is_unavailable());

        let spawn = SourceError::Spawn {
            program: "docker".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(spawn.is_unavailable());

        let read = SourceError::Read(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(!read.is_unavailable());
    }

    #[test]
    fn test_messages() {
        let err = SourceError::unavailable("web", "No such container: web");
        assert_eq!(err.to_string(), "web is unavailable: No such container: web");
    }
}
