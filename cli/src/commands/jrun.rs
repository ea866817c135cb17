//! jrun command - javac then java.

use std::path::{Path, PathBuf};

use anyhow::Result;
use shellaid_core::application::JavaService;

pub async fn run(config_path: Option<PathBuf>, source: &Path, args: &[String]) -> Result<i32> {
    let settings = super::settings(config_path).await?;
    Ok(JavaService::new(super::runner(&settings)).run(source, args).await?)
}
