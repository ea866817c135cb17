//! Screen session management.

use tracing::debug;

use crate::domain::{parse_screen_list, CommandSpec, ScreenSession, SessionState};
use crate::error::{Error, Result};
use crate::ports::CommandRunner;

/// Lists, attaches to and kills `screen` sessions.
pub struct ScreenService<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> ScreenService<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Sessions reported by `screen -ls`.
    pub async fn sessions(&self) -> Result<Vec<ScreenSession>> {
        // screen -ls exits non-zero on some systems even when it lists
        // sessions, so only the output matters.
        let captured = self.runner.capture(&CommandSpec::new("screen").arg("-ls")).await?;
        let sessions = parse_screen_list(&captured.text());
        debug!(count = sessions.len(), status = captured.status, "Listed screen sessions");
        Ok(sessions)
    }

    /// Find a live session by name.
    pub async fn find(&self, name: &str) -> Result<Option<ScreenSession>> {
        Ok(self
            .sessions()
            .await?
            .into_iter()
            .find(|s| s.matches(name) && s.state != SessionState::Dead))
    }

    /// Reattach to `name` if it exists, otherwise start it.
    pub async fn attach(&self, name: &str) -> Result<i32> {
        if name.is_empty() {
            return Err(Error::MissingArgument("session name"));
        }

        let cmd = match self.find(name).await? {
            Some(_) => CommandSpec::new("screen").args(["-d", "-r", name]),
            None => CommandSpec::new("screen").args(["-S", name]),
        };
        self.runner.run(&cmd).await
    }

    /// Terminate session `name`.
    pub async fn kill(&self, name: &str) -> Result<i32> {
        if name.is_empty() {
            return Err(Error::MissingArgument("session name"));
        }

        if self.find(name).await?.is_none() {
            return Err(Error::NoSuchSession(name.to_string()));
        }
        self.runner
            .run(&CommandSpec::new("screen").args(["-S", name, "-X", "quit"]))
            .await
    }
}
