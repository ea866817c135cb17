//! Config command - show or edit configuration.

use std::path::PathBuf;

use anyhow::Result;
use shellaid_core::Settings;

pub async fn show(config_path: Option<PathBuf>, json: bool) -> Result<i32> {
    let settings = super::settings(config_path).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(0);
    }

    print_settings(&settings);
    Ok(0)
}

pub async fn set(config_path: Option<PathBuf>, key: &str, value: &str) -> Result<i32> {
    let store = super::store(config_path)?;
    store.set(key, value).await?;
    println!("Set {} in {}", key, store.path().display());
    Ok(0)
}

pub fn path(config_path: Option<PathBuf>) -> Result<i32> {
    println!("{}", super::store(config_path)?.path().display());
    Ok(0)
}

fn print_settings(settings: &Settings) {
    println!("email:          {}", settings.email.as_deref().unwrap_or("(not set)"));
    println!("tmpDir:         {}", settings.tmp_dir.display());
    println!("pollIntervalMs: {}", settings.poll_interval.as_millis());
    println!("probeTimeoutMs: {}", settings.probe_timeout.as_millis());
    println!("host:           {}", settings.host);
    println!("upstreamRemote: {}", settings.upstream_remote);
    println!("mainBranch:     {}", settings.main_branch);
    println!("sendmail:       {}", settings.sendmail);
}
