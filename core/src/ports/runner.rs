//! Command runner port (interface).

use crate::domain::CommandSpec;
use crate::error::Result;

/// Exit status and combined output of a captured command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub status: i32,
    /// Stdout and stderr, interleaved in the order they were written.
    pub output: Vec<u8>,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

/// Port for running external programs.
///
/// Implementations return the child's exit status rather than an error when
/// the program runs but fails. Errors are reserved for spawn failures.
pub trait CommandRunner: Send + Sync {
    /// Run with stdin, stdout and stderr inherited from this process.
    fn run(&self, cmd: &CommandSpec) -> impl std::future::Future<Output = Result<i32>> + Send;

    /// Run with stdin inherited and both output streams captured together.
    fn capture(
        &self,
        cmd: &CommandSpec,
    ) -> impl std::future::Future<Output = Result<CapturedOutput>> + Send;
}
