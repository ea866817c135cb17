//! Port prober port (interface).

use crate::domain::PortProbe;

/// Port for checking whether something is listening on a TCP port.
pub trait PortProber: Send + Sync {
    /// Connect once and close. `true` if the connection was accepted.
    fn is_open(&self, probe: &PortProbe) -> impl std::future::Future<Output = bool> + Send;
}
