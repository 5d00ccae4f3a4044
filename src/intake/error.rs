//! Rejection taxonomy for the contact pipeline and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::response::ErrorBody;
use crate::intake::validate::FieldError;

pub const TOO_MANY_REQUESTS: &str = "Too many requests. Please try again later.";
pub const FAILED_TO_PROCESS: &str = "Failed to process request";

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// Client exceeded its admission quota for the current window.
    #[error("too many requests")]
    Throttled,

    #[error("invalid input: {0}")]
    InvalidInput(#[from] FieldError),

    /// Body could not be read or parsed. Mapped to 500, which is arguably a
    /// client error; kept for compatibility with existing form clients.
    #[error("malformed request: {0}")]
    MalformedRequest(#[source] BoxError),
}

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

impl From<serde_json::Error> for IntakeError {
    fn from(e: serde_json::Error) -> Self {
        IntakeError::MalformedRequest(Box::new(e))
    }
}

impl IntakeError {
    pub fn status(&self) -> StatusCode {
        match self {
            IntakeError::Throttled => StatusCode::TOO_MANY_REQUESTS,
            IntakeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            IntakeError::MalformedRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label used for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            IntakeError::Throttled => "throttled",
            IntakeError::InvalidInput(_) => "invalid",
            IntakeError::MalformedRequest(_) => "malformed",
        }
    }

    /// The message the client sees.
    pub fn public_message(&self) -> &'static str {
        match self {
            IntakeError::Throttled => TOO_MANY_REQUESTS,
            IntakeError::InvalidInput(e) => e.reason,
            IntakeError::MalformedRequest(_) => FAILED_TO_PROCESS,
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::validate::{Field, NAME_REQUIRED};

    #[test]
    fn test_status_mapping() {
        assert_eq!(IntakeError::Throttled.status(), StatusCode::TOO_MANY_REQUESTS);

        let invalid = IntakeError::from(FieldError {
            field: Field::Name,
            reason: NAME_REQUIRED,
        });
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.public_message(), NAME_REQUIRED);

        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let malformed = IntakeError::from(parse_err);
        assert_eq!(malformed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(malformed.public_message(), FAILED_TO_PROCESS);
    }
}
