//! Markup stripping for user-supplied text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::intake::model::{SanitizedSubmission, SubmissionRequest};

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup pattern"));

/// Remove every `<...>` span in a single pass, then trim.
///
/// Matching is leftmost-first and the span body may contain `<`, so no `<`
/// left behind is ever followed by a `>`.
pub fn sanitize(input: &str) -> String {
    MARKUP.replace_all(input, "").trim().to_string()
}

fn sanitize_opt(field: Option<&str>) -> String {
    sanitize(field.unwrap_or_default())
}

pub fn sanitize_submission(request: &SubmissionRequest) -> SanitizedSubmission {
    SanitizedSubmission {
        name: sanitize_opt(request.name.as_deref()),
        email: sanitize_opt(request.email.as_deref()),
        phone: sanitize_opt(request.phone.as_deref()),
        service: sanitize_opt(request.service.as_deref()),
        message: sanitize_opt(request.message.as_deref()),
    }
}
