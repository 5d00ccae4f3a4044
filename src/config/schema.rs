//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the intake service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the contact intake service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct IntakeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Per-client submission throttling.
    pub rate_limit: RateLimitConfig,

    /// Email/SMS dispatch settings.
    pub notifications: NotificationConfig,

    /// Business identity used in outbound messages.
    pub business: BusinessConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Admitted submissions per client per window.
    pub max_requests: u32,

    /// Window length in milliseconds.
    pub window_ms: u64,

    /// How often expired entries are evicted, in seconds. Zero disables the sweeper.
    pub sweep_interval_secs: u64,

    /// Upper bound on tracked client identifiers. Zero means unbounded.
    pub max_tracked_clients: usize,

    /// Header carrying the forwarded client address chain.
    pub client_ip_header: String,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 5,
            window_ms: 60_000,
            sweep_interval_secs: 300,
            max_tracked_clients: 100_000,
            client_ip_header: "x-forwarded-for".to_string(),
        }
    }
}

/// Notification dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Enable email/SMS dispatch after accepted submissions.
    pub enabled: bool,

    /// Capacity of the dispatch queue.
    pub queue_capacity: usize,

    /// Address that receives new-lead emails.
    pub business_email: String,

    /// Number that receives new-lead SMS alerts.
    pub business_phone: String,

    /// Sender address for outbound email.
    pub from_email: String,

    /// Retry policy for each individual send.
    pub retry: RetryConfig,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            queue_capacity: 256,
            business_email: "info@csdwaste.com".to_string(),
            business_phone: String::new(),
            from_email: "no-reply@csdwaste.com".to_string(),
            retry: RetryConfig::default(),
        }
    }
}

/// Retry configuration for notification sends.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per message (first try included).
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

/// Business identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BusinessConfig {
    pub name: String,
    pub phone: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "Clean Site Dumpsters".to_string(),
            phone: "615.717.2200".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024, // 64KB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
