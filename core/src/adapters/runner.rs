//! Command runner backed by `tokio::process`.

use std::io::SeekFrom;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::process::Command;
use tracing::debug;

use crate::domain::CommandSpec;
use crate::error::{Error, Result};
use crate::ports::{CapturedOutput, CommandRunner};

/// Runs commands as child processes of this one.
pub struct SystemRunner {
    /// Directory for capture buffers.
    tmp_dir: PathBuf,
}

impl SystemRunner {
    pub fn new(tmp_dir: impl Into<PathBuf>) -> Self {
        Self {
            tmp_dir: tmp_dir.into(),
        }
    }

    fn command(cmd: &CommandSpec) -> Command {
        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args).stdin(Stdio::inherit());
        command
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, cmd: &CommandSpec) -> Result<i32> {
        debug!(command = %cmd, "Running command");

        let status = Self::command(cmd)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Error::spawn(&cmd.program, e))?;

        let code = exit_code(status);
        debug!(command = %cmd, status = code, "Command finished");
        Ok(code)
    }

    async fn capture(&self, cmd: &CommandSpec) -> Result<CapturedOutput> {
        debug!(command = %cmd, tmp_dir = %self.tmp_dir.display(), "Running command with captured output");

        // One file for both streams keeps their relative order.
        let buffer = tempfile::tempfile_in(&self.tmp_dir)?;
        let stdout = buffer.try_clone()?;
        let stderr = buffer.try_clone()?;

        let status = Self::command(cmd)
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .await
            .map_err(|e| Error::spawn(&cmd.program, e))?;

        let mut buffer = tokio::fs::File::from_std(buffer);
        buffer.seek(SeekFrom::Start(0)).await?;
        let mut output = Vec::new();
        buffer.read_to_end(&mut output).await?;

        let code = exit_code(status);
        debug!(command = %cmd, status = code, bytes = output.len(), "Command finished");
        Ok(CapturedOutput {
            status: code,
            output,
        })
    }
}

/// Shell-style exit code: the child's code, or `128 + signal` if it was killed.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
