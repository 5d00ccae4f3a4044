//! Contact intake service library.

pub mod config;
pub mod http;
pub mod intake;
pub mod lifecycle;
pub mod notify;
pub mod observability;
pub mod resilience;
pub mod security;

pub use config::IntakeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
