//! Application layer - Use case services.
//!
//! One service per command. Services are thin orchestrators that:
//! - Accept domain types as inputs
//! - Use ports (traits) for external dependencies
//! - Return the wrapped tool's exit status, or an error for local failures

mod dispatch;
mod emailme;
mod extract;
mod fork_sync;
mod java;
mod quiet;
mod screen;
mod sequence;
mod wait;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{select_branch, Branch, DispatchService};
pub use emailme::EmailService;
pub use extract::ExtractService;
pub use fork_sync::ForkSyncService;
pub use java::JavaService;
pub use quiet::QuietService;
pub use screen::ScreenService;
pub use sequence::run_sequence;
pub use wait::{PortWaitService, ProcessWaitService};
