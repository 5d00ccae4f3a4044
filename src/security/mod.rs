//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming submission:
//!     → client identifier (X-Forwarded-For, or the shared "unknown" bucket)
//!     → rate_limit.rs (fixed window per client)
//!     → body is read and parsed only when admitted
//! ```
//!
//! # Design Decisions
//! - Throttle before parsing: malformed or invalid bodies still spend quota
//! - Fail closed: when the client table is full, new clients are denied
//! - No trust in client input

pub mod rate_limit;

pub use rate_limit::{RateLimitEntry, RateLimiter};
