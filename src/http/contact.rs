//! `POST /api/contact`.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::client_identifier;
use crate::http::response::AckBody;
use crate::http::server::AppState;
use crate::intake::{IntakeError, ValidSubmission};
use crate::observability::metrics;

pub async fn contact_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let client = client_identifier(request.headers(), &state.client_ip_header);

    match accept(&state, &client, request).await {
        Ok(submission) => {
            log_submission(&submission);
            if let Some(dispatcher) = &state.dispatcher {
                if let Err(e) = dispatcher.enqueue(submission) {
                    tracing::error!(error = %e, "Notifications not queued");
                }
            }
            metrics::record_submission("accepted", start);
            Json(AckBody::accepted()).into_response()
        }
        Err(err) => {
            match &err {
                IntakeError::Throttled => {
                    metrics::record_rate_limited();
                    tracing::warn!(client = %client, "Contact rate limit exceeded");
                }
                IntakeError::InvalidInput(e) => {
                    tracing::info!(client = %client, field = ?e.field, reason = e.reason, "Contact submission rejected");
                }
                IntakeError::MalformedRequest(e) => {
                    tracing::error!(client = %client, error = %e, "Contact form error");
                }
            }
            metrics::record_submission(err.outcome(), start);
            err.into_response()
        }
    }
}

async fn accept(
    state: &AppState,
    client: &str,
    request: Request<Body>,
) -> Result<ValidSubmission, IntakeError> {
    state.pipeline.admit(client)?;

    let body = axum::body::to_bytes(request.into_body(), state.max_body_size)
        .await
        .map_err(|e| IntakeError::MalformedRequest(Box::new(e)))?;

    state.pipeline.parse_and_validate(&body)
}

fn log_submission(sub: &ValidSubmission) {
    tracing::info!(
        name = %sub.name,
        email = %sub.email,
        phone = %sub.phone,
        service = sub.service().unwrap_or("Not specified"),
        message = sub.message().unwrap_or("No message"),
        timestamp = %sub.received_at.to_rfc3339(),
        "Contact form submission"
    );
}
