//! Conditional-input dispatch: one command for piped input, another for a
//! terminal.

use serde::Serialize;
use tracing::debug;

use crate::domain::CommandSpec;
use crate::error::Result;
use crate::ports::CommandRunner;

/// Which of the two commands runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Branch {
    /// Standard input is a pipe, file or other non-terminal source.
    Piped,
    /// Standard input is a terminal.
    Interactive,
}

/// Pick the branch for the current standard input.
pub fn select_branch(stdin_is_terminal: bool) -> Branch {
    if stdin_is_terminal {
        Branch::Interactive
    } else {
        Branch::Piped
    }
}

/// Runs one of two commands depending on where stdin comes from.
pub struct DispatchService<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> DispatchService<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Build the command for `branch`.
    ///
    /// Only the chosen command line is parsed. `args` are appended verbatim,
    /// one token each.
    pub fn plan(
        branch: Branch,
        piped: &str,
        interactive: &str,
        args: &[String],
    ) -> Result<CommandSpec> {
        let line = match branch {
            Branch::Piped => piped,
            Branch::Interactive => interactive,
        };
        Ok(CommandSpec::parse(line)?.args(args.iter().cloned()))
    }

    /// Run `piped` if stdin is not a terminal, `interactive` otherwise.
    pub async fn if_stdin(
        &self,
        piped: &str,
        interactive: &str,
        args: &[String],
        stdin_is_terminal: bool,
    ) -> Result<i32> {
        let branch = select_branch(stdin_is_terminal);
        let cmd = Self::plan(branch, piped, interactive, args)?;
        debug!(?branch, command = %cmd, "Dispatching");
        self.runner.run(&cmd).await
    }
}
