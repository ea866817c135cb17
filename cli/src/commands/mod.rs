//! Subcommand implementations.

pub mod config;
pub mod dispatch;
pub mod emailme;
pub mod extract;
pub mod fork;
pub mod jrun;
pub mod quiet;
pub mod screen;
pub mod wait;

use std::path::PathBuf;

use anyhow::Result;
use shellaid_core::adapters::SystemRunner;
use shellaid_core::{ConfigStore, Settings};
use tracing::debug;

/// Config store for `--config PATH`, or the default location.
pub fn store(config_path: Option<PathBuf>) -> Result<ConfigStore> {
    Ok(match config_path {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new()?,
    })
}

/// Load the config file and layer the environment over it.
pub async fn settings(config_path: Option<PathBuf>) -> Result<Settings> {
    let config = store(config_path)?.load().await?;
    let settings = Settings::from_env(config);
    debug!(?settings, "Resolved settings");
    Ok(settings)
}

/// Runner whose capture buffers go to the configured temp directory.
pub fn runner(settings: &Settings) -> SystemRunner {
    SystemRunner::new(settings.tmp_dir.clone())
}

/// Resolves when the user presses Ctrl-C.
pub async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available: never cancel.
        std::future::pending::<()>().await
    }
}
