use std::io;
use std::process::Stdio;

use futures::{StreamExt, stream};
use tokio::process::{Child, Command};

use crate::lines::blocking_byte_lines;
use crate::{LogSource, RawLines, SourceError};

/// Streams container logs through the `docker` command line client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DockerSource {
    binary: String,
}

impl DockerSource {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments for `docker logs`, following with timestamps
    fn logs_args(target: &str, tail: usize) -> Vec<String> {
        let tail = if tail > 0 {
            tail.to_string()
        } else {
            "all".to_string()
        };
        vec![
            "logs".to_string(),
            "--follow".to_string(),
            "--timestamps".to_string(),
            "--tail".to_string(),
            tail,
            target.to_string(),
        ]
    }

    /// Check that the container exists before following it
    async fn inspect(&self, target: &str) -> Result<(), SourceError> {
        let output = Command::new(&self.binary)
            .args(["inspect", "--format", "{{.Id}}", target])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| SourceError::Spawn {
                program: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            let reason = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if reason.is_empty() {
                format!("docker inspect exited with {}", output.status)
            } else {
                reason
            };
            return Err(SourceError::unavailable(target, reason));
        }

        Ok(())
    }
}

impl Default for DockerSource {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl LogSource for DockerSource {
    async fn open(&self, target: &str, tail: usize) -> Result<RawLines, SourceError> {
        self.inspect(target).await?;

        let args = Self::logs_args(target, tail);
        tracing::debug!(binary = %self.binary, ?args, "spawning docker logs");

        let spawn_error = |source: io::Error| SourceError::Spawn {
            program: self.binary.clone(),
            source,
        };

        // Both streams share one pipe so lines keep the order docker wrote them in
        let (reader, writer) = io::pipe().map_err(spawn_error)?;
        let child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(writer.try_clone().map_err(spawn_error)?)
            .stderr(writer)
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;

        let exit = stream::once(exit_status(child))
            .filter_map(|status| async move { status.err().map(Err::<Vec<u8>, io::Error>) });

        Ok(blocking_byte_lines(reader).chain(exit).boxed())
    }

    fn name(&self) -> &'static str {
        "Docker"
    }
}

/// Wait for `docker logs` once its output is exhausted.
///
/// A non-zero exit (daemon error, container removed mid-stream) becomes a
/// read error instead of a normal end of stream.
async fn exit_status(mut child: Child) -> io::Result<()> {
    let status = child.wait().await?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("docker logs exited with {status}")))
    }
}
