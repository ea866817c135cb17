//! Screen session domain model.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Attachment state reported by `screen -ls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Attached,
    Detached,
    /// Socket left behind by a session that no longer runs.
    Dead,
    Unknown,
}

impl SessionState {
    fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.starts_with("dead") {
            SessionState::Dead
        } else if label.contains("detached") {
            SessionState::Detached
        } else if label.contains("attached") {
            SessionState::Attached
        } else {
            SessionState::Unknown
        }
    }
}

/// One session listed by `screen -ls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSession {
    /// PID of the session's screen process.
    pub pid: u32,
    /// Session name (without the `PID.` prefix).
    pub name: String,
    pub state: SessionState,
}

impl ScreenSession {
    /// Whether `query` names this session, either as `NAME` or `PID.NAME`.
    pub fn matches(&self, query: &str) -> bool {
        self.name == query || format!("{}.{}", self.pid, self.name) == query
    }
}

impl std::fmt::Display for ScreenSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            SessionState::Attached => "attached",
            SessionState::Detached => "detached",
            SessionState::Dead => "dead",
            SessionState::Unknown => "unknown",
        };
        write!(f, "{}.{} ({})", self.pid, self.name, state)
    }
}

/// Parse the output of `screen -ls`.
///
/// Session lines look like `\t12345.name\t(date)\t(Detached)`; the last
/// parenthesised field is the state. Header and footer lines are skipped.
pub fn parse_screen_list(output: &str) -> Vec<ScreenSession> {
    let line_re = Regex::new(r"^\s+(\d+)\.(\S+)\s+(.*)$").expect("session line pattern is valid");
    let state_re = Regex::new(r"\(([^()]*)\)").expect("session state pattern is valid");

    let mut sessions = Vec::new();
    for line in output.lines() {
        let Some(caps) = line_re.captures(line) else {
            continue;
        };

        let pid: u32 = match caps[1].parse() {
            Ok(p) => p,
            Err(_) => continue,
        };

        let state = state_re
            .captures_iter(&caps[3])
            .last()
            .map(|c| SessionState::from_label(&c[1]))
            .unwrap_or(SessionState::Unknown);

        sessions.push(ScreenSession {
            pid,
            name: caps[2].to_string(),
            state,
        });
    }

    sessions
}
