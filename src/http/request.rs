//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Preserve IDs supplied by the client or an outer proxy
//!
//! # Design Decisions
//! - Request ID added as early as possible so every log line carries it

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Ensure every request carries an `x-request-id` header.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    if !req.headers().contains_key(X_REQUEST_ID) {
        if let Ok(value) = HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            req.headers_mut().insert(X_REQUEST_ID, value);
        }
    }
    next.run(req).await
}
