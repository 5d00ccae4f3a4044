//! Throttle → parse → sanitize → validate.

use crate::intake::error::IntakeError;
use crate::intake::model::{SubmissionRequest, ValidSubmission};
use crate::intake::sanitize::sanitize_submission;
use crate::intake::validate::validate;
use crate::security::rate_limit::RateLimiter;

/// Runs one submission through the gating stages. Holds no state of its own
/// beyond the shared limiter.
#[derive(Clone)]
pub struct ContactPipeline {
    limiter: RateLimiter,
}

impl ContactPipeline {
    pub fn new(limiter: RateLimiter) -> Self {
        Self { limiter }
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn admit(&self, client: &str) -> Result<(), IntakeError> {
        if self.limiter.check(client) {
            Ok(())
        } else {
            Err(IntakeError::Throttled)
        }
    }

    pub fn parse_and_validate(&self, body: &[u8]) -> Result<ValidSubmission, IntakeError> {
        let request: SubmissionRequest = serde_json::from_slice(body)?;
        let sanitized = sanitize_submission(&request);
        Ok(validate(sanitized)?)
    }

    /// The throttle runs first; a denied client never has its body parsed.
    pub fn process(&self, client: &str, body: &[u8]) -> Result<ValidSubmission, IntakeError> {
        self.admit(client)?;
        self.parse_and_validate(body)
    }
}
