//! Middleware for logging requests and responses.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::telegram::SECRET_TOKEN_HEADER;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and the full body is logged at the `debug` level. The webhook secret
/// token header is redacted.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body_text) = extract_parts_and_body_text_from_request(request).await;
    log_request(&parts, &body_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body_text) = extract_parts_and_body_text_from_response(response).await;
    log_response(&parts, &body_text);

    Response::from_parts(parts, body_text.into())
}

fn redact_secret_token(headers: &HeaderMap) -> HeaderMap {
    let mut redacted = headers.clone();

    if redacted.contains_key(SECRET_TOKEN_HEADER) {
        redacted.insert(SECRET_TOKEN_HEADER, HeaderValue::from_static("********"));
    }

    redacted
}

async fn extract_parts_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_parts_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

/// How many bytes of a body are logged at the `info` level before truncation.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

// Reply bodies hold multi-byte text, so the cut must land on a character
// boundary.
fn truncate_to_char_boundary(text: &str, limit: usize) -> &str {
    let mut end = limit;

    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    let headers = redact_secret_token(&parts.headers);

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {} {} {headers:#?}\nbody: {:}...",
            parts.method,
            parts.uri,
            truncate_to_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {} {headers:#?}\nbody: {body:?}",
            parts.method,
            parts.uri
        );
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {} {:#?}\nbody: {:}...",
            parts.status,
            parts.headers,
            truncate_to_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!(
            "Sending response: {} {:#?}\nbody: {body:?}",
            parts.status,
            parts.headers
        );
    }
}

#[cfg(test)]
mod logging_tests {
    use axum::http::{HeaderMap, HeaderValue};

    use crate::telegram::SECRET_TOKEN_HEADER;

    use super::{LOG_BODY_LENGTH_LIMIT, redact_secret_token, truncate_to_char_boundary};

    #[test]
    fn ascii_bodies_truncate_at_the_limit() {
        let text = "a".repeat(100);

        let truncated = truncate_to_char_boundary(&text, LOG_BODY_LENGTH_LIMIT);

        assert_eq!(truncated.len(), LOG_BODY_LENGTH_LIMIT);
    }

    #[test]
    fn truncation_backs_up_to_a_character_boundary() {
        let text = "a".repeat(LOG_BODY_LENGTH_LIMIT - 1) + "💰💰";

        let truncated = truncate_to_char_boundary(&text, LOG_BODY_LENGTH_LIMIT);

        assert_eq!(truncated, "a".repeat(LOG_BODY_LENGTH_LIMIT - 1));
    }

    #[test]
    fn the_secret_token_header_is_redacted() {
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_TOKEN_HEADER, HeaderValue::from_static("topsecret"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let redacted = redact_secret_token(&headers);

        assert_eq!(redacted[SECRET_TOKEN_HEADER], "********");
        assert_eq!(redacted["content-type"], "application/json");
    }

    #[test]
    fn headers_without_the_secret_token_are_unchanged() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let redacted = redact_secret_token(&headers);

        assert_eq!(redacted, headers);
    }
}
