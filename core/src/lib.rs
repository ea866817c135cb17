//! shellaid core library
//!
//! Typed wrappers for everyday shell chores. Provides functionality to:
//! - Pick a command based on whether stdin is piped
//! - Run a command quietly, showing output only on failure
//! - Extract archives by suffix
//! - Wait for unrelated processes to exit and for ports to open
//! - Sync a git fork with its upstream
//! - Mail the exit status of a long-running command
//! - Manage `screen` sessions and run single-file Java programs
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure values (commands, archive formats, probes, sessions)
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! Wrapped tools' exit statuses are returned as plain `i32`s and propagate
//! unchanged; [`Error`] covers only local failures.

// Hexagonal architecture layers
pub mod domain;
pub mod ports;
pub mod adapters;
pub mod application;

pub mod config;
pub mod error;
pub mod poll;

// Re-export domain types (primary API)
pub use domain::{ArchiveFormat, CommandSpec, MailMessage, PortProbe, ScreenSession, SessionState};

// Re-export other commonly used types
pub use config::{Config, ConfigStore, Settings};
pub use error::{Error, Result};
pub use poll::{Polled, Poller};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
