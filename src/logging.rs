//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Request bodies larger than this are rejected before reaching a handler.
const REQUEST_BODY_LIMIT: usize = 1024 * 1024;

const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, REQUEST_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!("Could not read body for {} {}: {error}", parts.method, parts.uri);
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    log_request(&parts, &body_text(&body_bytes));
    let response = next.run(Request::from_parts(parts, Body::from(body_bytes))).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log_response(&parts, &body_text(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn body_text(bytes: &Bytes) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// The prefix of `text` that fits in [LOG_BODY_LENGTH_LIMIT] characters, or
/// `None` if `text` is short enough to log in full.
fn truncate_for_log(text: &str) -> Option<&str> {
    text.char_indices()
        .nth(LOG_BODY_LENGTH_LIMIT)
        .map(|(byte_index, _)| &text[..byte_index])
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    match truncate_for_log(body) {
        Some(prefix) => {
            tracing::info!(
                "Received request: {} {}\nbody: {prefix}...",
                parts.method,
                parts.uri
            );
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        ),
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    match truncate_for_log(body) {
        Some(prefix) => {
            tracing::info!(
                "Sending response: {} {:?}\nbody: {prefix}...",
                parts.status,
                parts.headers
            );
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!(
            "Sending response: {} {:?}\nbody: {body:?}",
            parts.status,
            parts.headers
        ),
    }
}
