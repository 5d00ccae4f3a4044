//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Notification send:
//!     → retries.rs (retry transient failures)
//!     → backoff.rs (exponential delay + jitter between attempts)
//! ```
//!
//! # Design Decisions
//! - Only the background notification worker retries; the request path never does
//! - Permanent provider rejections are not retried
//! - Jittered backoff prevents thundering herd against providers

pub mod backoff;
pub mod retries;

pub use backoff::BackoffPolicy;
pub use retries::retry_with_backoff;
