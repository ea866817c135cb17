//! emailme command - run a command, then mail its status.

use std::path::PathBuf;

use anyhow::{Context, Result};
use shellaid_core::adapters::SendmailMailer;
use shellaid_core::application::EmailService;
use shellaid_core::{CommandSpec, Error};

pub async fn run(config_path: Option<PathBuf>, to: Option<String>, argv: &[String]) -> Result<i32> {
    let cmd = CommandSpec::from_argv(argv).ok_or(Error::MissingArgument("COMMAND"))?;
    let settings = super::settings(config_path).await?;
    let recipient = to.or_else(|| settings.email.clone());
    let cwd = std::env::current_dir().context("cannot determine working directory")?;

    let service = EmailService::new(
        super::runner(&settings),
        SendmailMailer::new(settings.sendmail.clone()),
    );
    Ok(service.run(&cmd, recipient.as_deref(), &cwd).await?)
}
