//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with external systems.

mod mailer;
mod process_table;
mod prober;
mod runner;

// Re-export main types for convenience
pub use mailer::SendmailMailer;
pub use process_table::ProcFsTable;
pub use prober::TcpProber;
pub use runner::SystemRunner;
