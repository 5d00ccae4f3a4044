//! Presence and shape checks on a sanitized submission.
//!
//! Checks run name → email → phone and stop at the first failure, so a
//! rejection always names exactly one field.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::intake::model::{SanitizedSubmission, ValidSubmission};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Valid email is required";
pub const PHONE_REQUIRED: &str = "Valid phone number is required";

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

// Digits, whitespace, hyphens, parentheses and plus signs; ten or more.
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s\-()+]{10,}$").expect("phone pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
}

/// The first field that failed and the user-facing reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct FieldError {
    pub field: Field,
    pub reason: &'static str,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

pub fn validate(submission: SanitizedSubmission) -> Result<ValidSubmission, FieldError> {
    if submission.name.trim().is_empty() {
        return Err(FieldError {
            field: Field::Name,
            reason: NAME_REQUIRED,
        });
    }
    if !is_valid_email(&submission.email) {
        return Err(FieldError {
            field: Field::Email,
            reason: EMAIL_REQUIRED,
        });
    }
    if !is_valid_phone(&submission.phone) {
        return Err(FieldError {
            field: Field::Phone,
            reason: PHONE_REQUIRED,
        });
    }

    let SanitizedSubmission {
        name,
        email,
        phone,
        service,
        message,
    } = submission;

    Ok(ValidSubmission {
        name,
        email,
        phone,
        service,
        message,
        received_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, phone: &str) -> SanitizedSubmission {
        SanitizedSubmission {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("test@example"));
        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_phone_shapes() {
        assert!(is_valid_phone("(615) 555-1234"));
        assert!(is_valid_phone("615-555-1234"));
        assert!(is_valid_phone("+1 615 555 1234"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("615.555.1234"));
        assert!(!is_valid_phone("call me maybe"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_name_checked_before_email() {
        let err = validate(submission("", "bad", "1")).unwrap_err();
        assert_eq!(err.field, Field::Name);
        assert_eq!(err.to_string(), NAME_REQUIRED);
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let err = validate(submission("   ", "jane@example.com", "615-555-1234")).unwrap_err();
        assert_eq!(err.field, Field::Name);
    }

    #[test]
    fn test_email_checked_before_phone() {
        let err = validate(submission("Jane", "jane@example", "1")).unwrap_err();
        assert_eq!(err.field, Field::Email);
        assert_eq!(err.reason, EMAIL_REQUIRED);
    }

    #[test]
    fn test_bad_phone() {
        let err = validate(submission("Jane", "jane@example.com", "12345")).unwrap_err();
        assert_eq!(err.field, Field::Phone);
        assert_eq!(err.reason, PHONE_REQUIRED);
    }

    #[test]
    fn test_optional_fields_pass_through() {
        let mut input = submission("Jane Doe", "jane@example.com", "615-555-1234");
        input.service = "anything at all".into();
        let valid = validate(input).unwrap();
        assert_eq!(valid.name, "Jane Doe");
        assert_eq!(valid.service(), Some("anything at all"));
        assert_eq!(valid.message(), None);
    }
}
