//! Mailer port (interface).

use crate::domain::MailMessage;
use crate::error::Result;

/// Port for handing a message to a mail transport.
pub trait Mailer: Send + Sync {
    /// Send one message. Returns once the transport has accepted it.
    fn send(&self, message: &MailMessage) -> impl std::future::Future<Output = Result<()>> + Send;
}
