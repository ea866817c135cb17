//! Short-circuit command sequences.

use tracing::info;

use crate::domain::CommandSpec;
use crate::error::Result;
use crate::ports::CommandRunner;

/// Run `steps` in order, stopping at the first non-zero status.
///
/// Returns that status, or 0 if every step succeeded. Like `a && b && c`.
pub async fn run_sequence<R: CommandRunner>(runner: &R, steps: &[CommandSpec]) -> Result<i32> {
    for step in steps {
        let status = runner.run(step).await?;
        if status != 0 {
            info!(command = %step, status, "Step failed, stopping sequence");
            return Ok(status);
        }
    }
    Ok(0)
}
