//! Not-found rendering for gated author pages.
//!
//! # Responsibilities
//! - Serve the site's 404 template when one resolves
//! - Render the minimal built-in not-found page otherwise
//! - Emit cache-prevention headers and the not-found marker

use axum::http::header::{CACHE_CONTROL, EXPIRES};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::fs;

use crate::config::GateConfig;

/// Response extension marking a request answered as not-found.
#[derive(Debug, Clone, Copy)]
pub struct NotFound;

pub const CACHE_CONTROL_VALUE: &str = "no-cache, must-revalidate, max-age=0";

// Fixed past date, so the response is already expired for any cache.
const EXPIRES_VALUE: &str = "Wed, 11 Jan 1984 05:00:00 GMT";

/// Add cache-prevention headers to a response.
pub fn nocache_headers(headers: &mut HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    headers.insert(EXPIRES, HeaderValue::from_static(EXPIRES_VALUE));
}

/// Build the error response for a gated author page. Request processing
/// stops here.
pub fn respond(config: &GateConfig, status_code: u16) -> Response {
    let status = StatusCode::from_u16(status_code).unwrap_or(StatusCode::NOT_FOUND);
    let body = resolve_template(config).unwrap_or_else(|| fallback_page(config));

    let mut res = (status, Html(body)).into_response();
    nocache_headers(res.headers_mut());
    res.extensions_mut().insert(NotFound);
    res
}

fn resolve_template(config: &GateConfig) -> Option<String> {
    let path = config.not_found_template.as_ref()?;
    match fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(err) => {
            tracing::warn!(
                template = %path.display(),
                error = %err,
                "Not-found template unreadable, using built-in page"
            );
            None
        }
    }
}

fn fallback_page(config: &GateConfig) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title></head>\
         <body><h1>{}</h1></body></html>",
        escape_html(&config.not_found_title),
        escape_html(&config.not_found_heading),
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
