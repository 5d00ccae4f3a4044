//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, client identifier)
//!     → contact.rs (intake pipeline, enqueue notifications)
//!     → response.rs (JSON ack / error bodies)
//!     → Send to client
//! ```

pub mod contact;
pub mod health;
pub mod request;
pub mod response;
pub mod server;

pub use request::{client_identifier, UNKNOWN_CLIENT, X_REQUEST_ID};
pub use response::{AckBody, ErrorBody};
pub use server::{AppState, HttpServer};
