//! quiet command - hide output unless the command fails.

use std::path::PathBuf;

use anyhow::Result;
use shellaid_core::application::QuietService;
use shellaid_core::{CommandSpec, Error};

pub async fn run(config_path: Option<PathBuf>, argv: &[String]) -> Result<i32> {
    let cmd = CommandSpec::from_argv(argv).ok_or(Error::MissingArgument("COMMAND"))?;
    let settings = super::settings(config_path).await?;
    let service = QuietService::new(super::runner(&settings));

    let mut stdout = std::io::stdout().lock();
    Ok(service.quiet(&cmd, &mut stdout).await?)
}
