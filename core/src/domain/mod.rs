//! Domain layer - Pure values describing what to run.
//!
//! This module contains domain entities that represent core business concepts.
//! These types have no I/O dependencies and can be tested in isolation.

mod archive;
mod command;
mod mail;
mod probe;
mod screen;

// Re-export all domain types
pub use archive::ArchiveFormat;
pub use command::{path_arg, CommandSpec};
pub use mail::{validate_recipient, MailMessage};
pub use probe::PortProbe;
pub use screen::{parse_screen_list, ScreenSession, SessionState};
