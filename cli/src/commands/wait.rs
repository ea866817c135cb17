//! wait-ext and wait-port commands - poll until processes exit or ports open.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use shellaid_core::adapters::{ProcFsTable, TcpProber};
use shellaid_core::application::{PortWaitService, ProcessWaitService};
use shellaid_core::{Poller, Settings};

/// Poll options shared by the wait commands.
#[derive(Args, Debug, Clone, Copy)]
pub struct PollArgs {
    /// Give up after this many seconds (exit 124)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Time between checks in milliseconds (default from config, usually 1000)
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: Option<u64>,
}

impl PollArgs {
    fn poller(&self, settings: &Settings) -> Poller {
        let interval = self
            .interval_ms
            .map(Duration::from_millis)
            .unwrap_or(settings.poll_interval);
        Poller::new(interval).with_timeout(self.timeout.map(Duration::from_secs))
    }
}

pub async fn ext(config_path: Option<PathBuf>, pids: &[u32], poll: PollArgs) -> Result<i32> {
    let settings = super::settings(config_path).await?;
    let service = ProcessWaitService::new(ProcFsTable::new(), poll.poller(&settings));

    let mut stderr = std::io::stderr();
    service.wait(pids, &mut stderr, super::interrupted()).await?;
    Ok(0)
}

pub async fn port(
    config_path: Option<PathBuf>,
    ports: &[u16],
    host: Option<String>,
    poll: PollArgs,
) -> Result<i32> {
    let settings = super::settings(config_path).await?;
    let host = host.unwrap_or_else(|| settings.host.clone());
    let service = PortWaitService::new(
        TcpProber::with_timeout(settings.probe_timeout),
        poll.poller(&settings),
        host,
    );

    service.wait(ports, super::interrupted()).await?;
    Ok(0)
}
