//! Notification subsystem.
//!
//! # Data Flow
//! ```text
//! ValidSubmission
//!     → dispatcher.rs (bounded queue, never blocks the handler)
//!     → templates.rs (business email, confirmation email, lead SMS, customer SMS)
//!     → email.rs / sms.rs senders, each send retried with backoff
//! ```
//!
//! # Design Decisions
//! - Acceptance never waits on, or fails because of, a provider
//! - Failed sends are logged and counted, then dropped (no outbox)

pub mod catalog;
pub mod dispatcher;
pub mod email;
pub mod error;
pub mod sms;
pub mod templates;

pub use dispatcher::{Dispatcher, NotificationWorker};
pub use email::{EmailMessage, EmailSender, LogEmailSender};
pub use error::NotifyError;
pub use sms::{LogSmsSender, SmsMessage, SmsSender};
pub use templates::Templates;
