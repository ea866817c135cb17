//! Quiet execution: show a command's output only when it fails.

use std::io::Write;

use tracing::debug;

use crate::domain::CommandSpec;
use crate::error::Result;
use crate::ports::CommandRunner;

/// Runs commands with buffered output.
pub struct QuietService<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> QuietService<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Run `cmd`; on failure write its combined output to `out`.
    pub async fn quiet<W: Write>(&self, cmd: &CommandSpec, out: &mut W) -> Result<i32> {
        let captured = self.runner.capture(cmd).await?;
        if captured.success() {
            debug!(command = %cmd, bytes = captured.output.len(), "Discarding output");
            return Ok(0);
        }

        out.write_all(&captured.output)?;
        out.flush()?;
        Ok(captured.status)
    }
}
