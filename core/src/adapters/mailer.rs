//! Mail transport adapter using a local `sendmail`.

use std::process::Stdio;

use chrono::Local;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::domain::MailMessage;
use crate::error::{Error, Result};
use crate::ports::Mailer;

/// Pipes messages into `sendmail -t`.
pub struct SendmailMailer {
    program: String,
}

impl SendmailMailer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SendmailMailer {
    fn default() -> Self {
        Self::new("sendmail")
    }
}

impl Mailer for SendmailMailer {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        debug!(program = %self.program, to = %message.to, "Sending mail");

        let mut child = Command::new(&self.program)
            .arg("-t")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::MailTransport(format!("failed to start {}: {}", self.program, e)))?;

        let text = message.render(Local::now());
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| Error::MailTransport(format!("failed to write message: {}", e)))?;
            // Dropping stdin signals end of message.
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| Error::MailTransport(format!("failed to wait for {}: {}", self.program, e)))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(Error::MailTransport(format!(
                "{} exited with {}: {}",
                self.program,
                super::runner::exit_code(output.status),
                stderr.trim()
            )))
        }
    }
}
