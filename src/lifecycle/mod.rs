//! Process lifecycle.
//!
//! # Shutdown Order
//! ```text
//! SIGINT / SIGTERM
//!     → signals.rs resolves
//!     → Shutdown::trigger()
//!     → HTTP server stops accepting, finishes in-flight requests
//!     → router dropped, notification worker drains its queue and exits
//!     → rate-limit sweeper exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::termination_signal;
