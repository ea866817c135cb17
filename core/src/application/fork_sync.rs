//! Fork sync: bring a fork's main branch up to date with its upstream.

use tracing::info;

use crate::domain::CommandSpec;
use crate::error::Result;
use crate::ports::CommandRunner;

use super::run_sequence;

/// Runs `git fetch`, `git checkout` and `git merge` in sequence.
pub struct ForkSyncService<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> ForkSyncService<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// The git commands for syncing `branch` from `remote`.
    pub fn steps(remote: &str, branch: &str) -> Vec<CommandSpec> {
        vec![
            CommandSpec::new("git").args(["fetch", remote]),
            CommandSpec::new("git").args(["checkout", branch]),
            CommandSpec::new("git").arg("merge").arg(format!("{}/{}", remote, branch)),
        ]
    }

    /// Sync, stopping at the first failing git command.
    pub async fn sync(&self, remote: &str, branch: &str) -> Result<i32> {
        info!(remote, branch, "Syncing fork");
        run_sequence(&self.runner, &Self::steps(remote, branch)).await
    }
}
