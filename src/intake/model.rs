//! Submission payloads at each stage of the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw contact-form body as posted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-form label of the service the visitor is interested in.
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Every field stripped of markup. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

/// A sanitized submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

impl ValidSubmission {
    pub fn service(&self) -> Option<&str> {
        non_empty(&self.service)
    }

    pub fn message(&self) -> Option<&str> {
        non_empty(&self.message)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
