//! Process table adapter.

use std::path::PathBuf;

use crate::ports::ProcessTable;

/// Looks PIDs up under `/proc`, falling back to a null signal where there
/// is no procfs.
pub struct ProcFsTable {
    root: PathBuf,
}

impl ProcFsTable {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    /// Use a different procfs mount (for testing).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for ProcFsTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable for ProcFsTable {
    fn exists(&self, pid: u32) -> bool {
        // PID 0 means "my process group" to kill(2).
        if pid == 0 || pid > i32::MAX as u32 {
            return false;
        }

        if self.root.is_dir() {
            return self.root.join(pid.to_string()).exists();
        }

        signal_probe(pid)
    }
}

#[cfg(unix)]
fn signal_probe(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    match kill(Pid::from_raw(pid as i32), None) {
        Ok(()) => true,
        // Exists, but belongs to someone else.
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn signal_probe(_pid: u32) -> bool {
    false
}
