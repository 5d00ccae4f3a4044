//! Contact-form intake subsystem.
//!
//! # Data Flow
//! ```text
//! POST body + client identifier
//!     → security::rate_limit (admit / throttle)
//!     → serde_json (parse SubmissionRequest)
//!     → sanitize.rs (strip markup, trim)
//!     → validate.rs (name → email → phone, first failure wins)
//!     → ValidSubmission handed to notify::Dispatcher
//! ```

pub mod error;
pub mod model;
pub mod pipeline;
pub mod sanitize;
pub mod validate;

pub use error::IntakeError;
pub use model::{SanitizedSubmission, SubmissionRequest, ValidSubmission};
pub use pipeline::ContactPipeline;
pub use sanitize::{sanitize, sanitize_submission};
pub use validate::{validate, Field, FieldError};
