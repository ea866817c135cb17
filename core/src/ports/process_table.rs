//! Process table port (interface).

/// Port for observing processes this program does not own.
pub trait ProcessTable: Send + Sync {
    /// Check if a process with this PID currently exists.
    fn exists(&self, pid: u32) -> bool;
}
