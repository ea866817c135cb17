//! TCP connect-and-close prober.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::domain::PortProbe;
use crate::ports::PortProber;

/// Default per-attempt connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Probes ports with a plain TCP connect, like `nc -z`.
pub struct TcpProber {
    connect_timeout: Duration,
}

impl TcpProber {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeout(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new()
    }
}

impl PortProber for TcpProber {
    async fn is_open(&self, probe: &PortProbe) -> bool {
        let address = probe.address();
        match timeout(self.connect_timeout, TcpStream::connect(&address)).await {
            Ok(Ok(stream)) => {
                drop(stream);
                debug!(address = %address, "Port accepted connection");
                true
            }
            Ok(Err(e)) => {
                debug!(address = %address, error = %e, "Port refused connection");
                false
            }
            Err(_) => {
                debug!(address = %address, "Connect attempt timed out");
                false
            }
        }
    }
}
