//! Run a command, then mail its exit status.

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::domain::{validate_recipient, CommandSpec, MailMessage};
use crate::error::{Error, Result};
use crate::ports::{CommandRunner, Mailer};

/// Runs a command and sends a completion mail.
pub struct EmailService<R: CommandRunner, M: Mailer> {
    runner: R,
    mailer: M,
}

impl<R: CommandRunner, M: Mailer> EmailService<R, M> {
    pub fn new(runner: R, mailer: M) -> Self {
        Self { runner, mailer }
    }

    /// Run `cmd` and mail `recipient` when it finishes. `cwd` is only
    /// reported in the message body.
    ///
    /// Without a valid recipient nothing runs and nothing is sent. A command
    /// that cannot be started is reported with its shell status (127 when
    /// the program does not exist). If the mail cannot be sent, a failed
    /// command's status still wins; a transport error is only returned for a
    /// command that succeeded.
    pub async fn run(&self, cmd: &CommandSpec, recipient: Option<&str>, cwd: &Path) -> Result<i32> {
        let recipient = recipient
            .filter(|r| !r.trim().is_empty())
            .ok_or(Error::NoRecipient)?;
        let recipient = validate_recipient(recipient)?;

        let started = Instant::now();
        let status = match self.runner.run(cmd).await {
            Ok(status) => status,
            Err(e @ Error::Spawn { .. }) => {
                warn!(error = %e, "Command did not start");
                e.exit_code()
            }
            Err(e) => return Err(e),
        };
        let elapsed = started.elapsed();

        let message = MailMessage::completion(recipient, cmd, status, cwd, elapsed);
        match self.mailer.send(&message).await {
            Ok(()) => {
                info!(to = recipient, status, "Completion mail sent");
                Ok(status)
            }
            Err(e) if status != 0 => {
                warn!(error = %e, status, "Could not send completion mail");
                Ok(status)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SystemRunner;
    use crate::application::testing::{CapturingMailer, RecordingRunner};
    use crate::ports::CapturedOutput;

    fn cmd() -> CommandSpec {
        CommandSpec::new("cargo").arg("build")
    }

    fn exiting(status: i32) -> RecordingRunner {
        RecordingRunner::with(move |_| CapturedOutput {
            status,
            output: Vec::new(),
        })
    }

    #[tokio::test]
    async fn test_no_recipient_runs_nothing() {
        let service = EmailService::new(RecordingRunner::ok(), CapturingMailer::new());

        for recipient in [None, Some(""), Some("  ")] {
            let err = service.run(&cmd(), recipient, Path::new("/")).await.unwrap_err();
            assert!(matches!(err, Error::NoRecipient));
            assert_eq!(err.exit_code(), 1);
        }
        assert!(service.runner.calls().is_empty());
        assert!(service.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_header_breaking_recipient_runs_nothing() {
        let service = EmailService::new(RecordingRunner::ok(), CapturingMailer::new());

        let err = service
            .run(&cmd(), Some("dev@example.com\nBcc: all@example.com"), Path::new("/"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRecipient(_)));
        assert!(service.runner.calls().is_empty());
        assert!(service.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_program_still_mails() {
        let service = EmailService::new(SystemRunner::default(), CapturingMailer::new());
        let status = service
            .run(
                &CommandSpec::new("shellaid-no-such-program"),
                Some("dev@example.com"),
                Path::new("/"),
            )
            .await
            .unwrap();
        assert_eq!(status, 127);

        let sent = service.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].subject,
            "[shellaid] shellaid-no-such-program exited with 127"
        );
    }

    #[tokio::test]
    async fn test_sends_one_mail_with_status() {
        let service = EmailService::new(exiting(5), CapturingMailer::new());
        let status = service
            .run(&cmd(), Some("dev@example.com"), Path::new("/work"))
            .await
            .unwrap();
        assert_eq!(status, 5);

        let sent = service.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "dev@example.com");
        assert_eq!(sent[0].subject, "[shellaid] cargo build exited with 5");
        assert!(sent[0].body.contains("Directory: /work"));
    }

    #[tokio::test]
    async fn test_transport_failure_after_success_is_an_error() {
        let service = EmailService::new(exiting(0), CapturingMailer::failing());
        let err = service
            .run(&cmd(), Some("dev@example.com"), Path::new("/"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MailTransport(_)));
    }

    #[tokio::test]
    async fn test_command_failure_wins_over_transport_failure() {
        let service = EmailService::new(exiting(3), CapturingMailer::failing());
        let status = service
            .run(&cmd(), Some("dev@example.com"), Path::new("/"))
            .await
            .unwrap();
        assert_eq!(status, 3);
    }
}
