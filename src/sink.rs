//! Delivery of serialized events to an external command.

use super::error::Error;

use async_trait::async_trait;
use std::{io, process::Stdio};
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::debug;

#[async_trait]
pub trait Sink: Send + Sync {
    /// Deliver one payload and return what the receiver produced.
    async fn dispatch(&self, payload: &str) -> Result<Vec<u8>, Error>;
}

/// Runs `program args...` once per payload, feeding the payload on stdin.
#[derive(Debug, Clone)]
pub struct CommandSink {
    program: String,
    args: Vec<String>,
}

impl CommandSink {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        self.program.as_str()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn failed(&self, reason: impl ToString) -> Error {
        Error::DispatchFailed {
            command: self.program.clone(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl Sink for CommandSink {
    /// Spawn the command, write `payload` to its stdin and close it, then wait for
    /// the process to exit. Returns stdout followed by stderr.
    ///
    /// Fails with [`Error::DispatchFailed`] if the process cannot be started or
    /// exits with a non-zero status.
    async fn dispatch(&self, payload: &str) -> Result<Vec<u8>, Error> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| self.failed(err))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.failed("stdin is not captured"))?;

        // Output is drained while the payload is written, so a command echoing
        // large input back cannot fill its pipes and stall.
        let write = async move {
            stdin.write_all(payload.as_bytes()).await?;
            stdin.shutdown().await
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());

        let output = output.map_err(|err| self.failed(err))?;

        match written {
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                debug!("`{}` closed stdin before reading all input", self.program);
            }
            Err(err) => return Err(self.failed(err)),
            Ok(()) => {}
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failed(format!("{}: {}", output.status, stderr.trim())));
        }

        let mut combined = output.stdout;
        combined.extend(output.stderr);
        Ok(combined)
    }
}
