//! sync-fork command - merge upstream into the main branch.

use std::path::PathBuf;

use anyhow::Result;
use shellaid_core::application::ForkSyncService;

pub async fn sync(
    config_path: Option<PathBuf>,
    remote: Option<String>,
    branch: Option<String>,
) -> Result<i32> {
    let settings = super::settings(config_path).await?;
    let remote = remote.unwrap_or_else(|| settings.upstream_remote.clone());
    let branch = branch.unwrap_or_else(|| settings.main_branch.clone());

    let service = ForkSyncService::new(super::runner(&settings));
    Ok(service.sync(&remote, &branch).await?)
}
