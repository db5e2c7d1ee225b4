//! Upstream forwarding.
//!
//! # Responsibilities
//! - Rewrite the request URI to target the origin
//! - Preserve the client IP in X-Forwarded-For
//! - Stream the origin response back to the client
//!
//! # Design Decisions
//! - Origin errors map to 502 Bad Gateway
//! - Responses stream through without buffering

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::uri::{Authority, Scheme};
use axum::http::{header, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::str::FromStr;

use crate::http::server::AppState;
use crate::http::request::X_REQUEST_ID;

/// Forward a request to the configured origin.
pub async fn forward(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
) -> Response {
    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
        "Forwarding request"
    );

    let authority = match Authority::from_str(&state.upstream) {
        Ok(authority) => authority,
        Err(err) => {
            tracing::error!(upstream = %state.upstream, error = %err, "Invalid upstream address");
            return (StatusCode::BAD_GATEWAY, "Invalid upstream address").into_response();
        }
    };

    let (parts, body) = req.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(authority);
    let uri = Uri::from_parts(uri_parts).unwrap_or_else(|_| parts.uri.clone());

    let mut builder = Request::builder()
        .method(parts.method.clone())
        .uri(uri)
        .version(parts.version);

    if let Some(headers) = builder.headers_mut() {
        for (name, value) in parts.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }
        let forwarded = match parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
        {
            Some(existing) => format!("{existing}, {}", addr.ip()),
            None => addr.ip().to_string(),
        };
        if let Ok(value) = header::HeaderValue::from_str(&forwarded) {
            headers.insert("x-forwarded-for", value);
        }
    }

    let upstream_req = match builder.body(body) {
        Ok(req) => req,
        Err(err) => {
            tracing::error!(request_id = %request_id, error = %err, "Failed to build upstream request");
            return (StatusCode::BAD_GATEWAY, "Failed to build upstream request").into_response();
        }
    };

    match state.client.request(upstream_req).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body)).into_response()
        }
        Err(err) => {
            tracing::error!(request_id = %request_id, error = %err, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
