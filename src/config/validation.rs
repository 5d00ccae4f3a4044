//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (quota > 0, window > 0, delays ordered)
//! - Validate addresses parse before the listener binds
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: IntakeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderName;

use crate::config::schema::IntakeConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a parsed configuration for values serde cannot reject on its own.
pub fn validate_config(config: &IntakeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a socket address: {:?}", config.listener.bind_address),
        ));
    }

    let rl = &config.rate_limit;
    if rl.max_requests == 0 {
        errors.push(ValidationError::new("rate_limit.max_requests", "must be at least 1"));
    }
    if rl.window_ms == 0 {
        errors.push(ValidationError::new("rate_limit.window_ms", "must be greater than 0"));
    }
    if HeaderName::from_bytes(rl.client_ip_header.as_bytes()).is_err() {
        errors.push(ValidationError::new(
            "rate_limit.client_ip_header",
            format!("not a valid header name: {:?}", rl.client_ip_header),
        ));
    }

    let notify = &config.notifications;
    if notify.queue_capacity == 0 {
        errors.push(ValidationError::new("notifications.queue_capacity", "must be at least 1"));
    }
    if notify.retry.max_attempts == 0 {
        errors.push(ValidationError::new("notifications.retry.max_attempts", "must be at least 1"));
    }
    if notify.retry.base_delay_ms > notify.retry.max_delay_ms {
        errors.push(ValidationError::new(
            "notifications.retry.base_delay_ms",
            "must not exceed max_delay_ms",
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("not a socket address: {:?}", obs.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
