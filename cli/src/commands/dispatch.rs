//! if-stdin command - pick a command by stdin type.

use std::path::PathBuf;

use anyhow::Result;
use shellaid_core::application::DispatchService;

pub async fn if_stdin(
    config_path: Option<PathBuf>,
    piped: &str,
    interactive: &str,
    args: &[String],
) -> Result<i32> {
    let settings = super::settings(config_path).await?;
    let service = DispatchService::new(super::runner(&settings));
    let stdin_is_terminal = atty::is(atty::Stream::Stdin);
    Ok(service
        .if_stdin(piped, interactive, args, stdin_is_terminal)
        .await?)
}
