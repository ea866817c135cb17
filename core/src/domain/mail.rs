//! Completion mail domain model.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::CommandSpec;
use crate::error::{Error, Result};

/// A plain-text message handed to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    /// Report that `command` finished with `status`.
    pub fn completion(
        to: impl Into<String>,
        command: &CommandSpec,
        status: i32,
        cwd: &Path,
        elapsed: Duration,
    ) -> Self {
        let line = command.to_string();
        let subject = format!("[shellaid] {} exited with {}", one_line(&line, 60), status);
        let body = format!(
            "Command:   {}\nDirectory: {}\nStatus:    {}\nElapsed:   {}\n",
            line,
            cwd.display(),
            status,
            format_elapsed(elapsed),
        );
        Self {
            to: to.into(),
            subject,
            body,
        }
    }

    /// Render as an RFC 5322 message for `sendmail -t`.
    pub fn render(&self, date: DateTime<Local>) -> String {
        format!(
            "To: {}\nSubject: {}\nDate: {}\nContent-Type: text/plain; charset=utf-8\n\n{}",
            self.to,
            self.subject,
            date.to_rfc2822(),
            self.body
        )
    }
}

/// Check that `to` can go into a `To:` header as-is.
///
/// A control character (such as a newline) would start a new header line.
pub fn validate_recipient(to: &str) -> Result<&str> {
    if to.chars().any(char::is_control) {
        return Err(Error::InvalidRecipient(to.to_string()));
    }
    Ok(to)
}

fn one_line(s: &str, max: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max - 1).collect();
        format!("{}…", cut)
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h{:02}m{:02}s", h, m, s)
    } else if m > 0 {
        format!("{}m{:02}s", m, s)
    } else {
        format!("{}.{:03}s", s, elapsed.subsec_millis())
    }
}
