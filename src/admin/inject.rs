//! Script injection middleware for admin pages.
//!
//! Buffers HTML responses on admin paths and splices the block
//! unregistration script into the document head. Non-HTML responses and
//! non-admin paths pass through untouched.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::admin::blocks;
use crate::http::server::AppState;

// Admin pages are small; a body over this limit is treated as an
// upstream fault.
const MAX_REWRITE_BYTES: usize = 4 * 1024 * 1024;

pub async fn admin_scripts(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let is_admin = state.gate.is_admin_path(req.uri().path());
    let res = next.run(req).await;

    if !is_admin || !is_html(res.headers()) {
        return res;
    }

    let (mut parts, body) = res.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_REWRITE_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, "Failed to buffer admin page for script injection");
            return (StatusCode::BAD_GATEWAY, "Admin page too large to rewrite").into_response();
        }
    };

    let rewritten = inject_before_head_end(&bytes, blocks::unregister_script().as_bytes());
    parts
        .headers
        .insert(CONTENT_LENGTH, HeaderValue::from(rewritten.len()));

    Response::from_parts(parts, Body::from(rewritten))
}

fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().starts_with("text/html"))
        .unwrap_or(false)
}

/// Splice `script` in front of the closing head tag, or append it when the
/// document has none.
fn inject_before_head_end(html: &[u8], script: &[u8]) -> Vec<u8> {
    let position = html
        .windows(b"</head>".len())
        .position(|window| window.eq_ignore_ascii_case(b"</head>"));

    let mut out = Vec::with_capacity(html.len() + script.len());
    match position {
        Some(at) => {
            out.extend_from_slice(&html[..at]);
            out.extend_from_slice(script);
            out.extend_from_slice(&html[at..]);
        }
        None => {
            out.extend_from_slice(html);
            out.extend_from_slice(script);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injects_before_head_end() {
        let html = b"<html><head><title>Admin</title></head><body></body></html>";
        let out = inject_before_head_end(html, b"<script>x</script>");
        assert_eq!(
            out,
            b"<html><head><title>Admin</title><script>x</script></head><body></body></html>"
        );
    }

    #[test]
    fn test_head_match_is_case_insensitive() {
        let out = inject_before_head_end(b"<HEAD></HEAD>", b"S");
        assert_eq!(out, b"<HEAD>S</HEAD>");
    }

    #[test]
    fn test_appends_without_head() {
        let out = inject_before_head_end(b"plain", b"S");
        assert_eq!(out, b"plainS");
    }

    #[test]
    fn test_is_html() {
        let mut headers = HeaderMap::new();
        assert!(!is_html(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
        assert!(is_html(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(!is_html(&headers));
    }
}
