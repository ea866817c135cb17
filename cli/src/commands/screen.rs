//! screen command - list, attach to and kill screen sessions.

use std::path::PathBuf;

use anyhow::Result;
use shellaid_core::application::ScreenService;

pub async fn list(config_path: Option<PathBuf>, json: bool) -> Result<i32> {
    let settings = super::settings(config_path).await?;
    let sessions = ScreenService::new(super::runner(&settings)).sessions().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(0);
    }

    if sessions.is_empty() {
        println!("No screen sessions.");
        return Ok(0);
    }

    for session in &sessions {
        println!("{}", session);
    }
    Ok(0)
}

pub async fn attach(config_path: Option<PathBuf>, name: &str) -> Result<i32> {
    let settings = super::settings(config_path).await?;
    Ok(ScreenService::new(super::runner(&settings)).attach(name).await?)
}

pub async fn kill(config_path: Option<PathBuf>, name: &str) -> Result<i32> {
    let settings = super::settings(config_path).await?;
    Ok(ScreenService::new(super::runner(&settings)).kill(name).await?)
}
