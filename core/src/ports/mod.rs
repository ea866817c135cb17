//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with external systems. Implementations live in `adapters`.

mod mailer;
mod process_table;
mod prober;
mod runner;

pub use mailer::Mailer;
pub use process_table::ProcessTable;
pub use prober::PortProber;
pub use runner::{CapturedOutput, CommandRunner};
