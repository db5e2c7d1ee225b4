//! Redirect construction for gated author pages.
//!
//! # Responsibilities
//! - Coerce configured status codes into the valid redirect range
//! - Restrict redirect targets to same-site/allowed hosts
//! - Build the redirect response
//!
//! # Design Decisions
//! - Out-of-range codes become 301, matching the error-branch split: only
//!   404/410 take the error path, everything else redirects
//! - Off-list absolute targets silently fall back to the home URL

use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use url::Url;

/// Coerce a configured status code into the redirect range.
/// Anything outside 300–399 becomes 301.
pub fn coerce_status(code: u16) -> StatusCode {
    let code = if (300..=399).contains(&code) { code } else { 301 };
    StatusCode::from_u16(code).unwrap_or(StatusCode::MOVED_PERMANENTLY)
}

/// Resolve a redirect target, restricted to safe destinations.
///
/// Empty targets and absolute URLs whose host is neither the home URL's
/// host nor on the allow list resolve to the home URL. Site-relative
/// targets pass through.
pub fn sanitize_target(target: &str, home_url: &str, allowed_hosts: &[String]) -> String {
    if target.is_empty() {
        return home_url.to_string();
    }

    match Url::parse(target) {
        Ok(url) => {
            let Some(host) = url.host_str() else {
                return home_url.to_string();
            };
            let home_host = Url::parse(home_url)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string));

            let allowed = home_host
                .map(|h| h.eq_ignore_ascii_case(host))
                .unwrap_or(false)
                || allowed_hosts.iter().any(|h| h.eq_ignore_ascii_case(host));

            if allowed {
                target.to_string()
            } else {
                home_url.to_string()
            }
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => target.to_string(),
        Err(_) => home_url.to_string(),
    }
}

/// Build the redirect response. Request processing stops here.
pub fn respond(status: StatusCode, location: &str) -> Response {
    let location =
        HeaderValue::from_str(location).unwrap_or_else(|_| HeaderValue::from_static("/"));
    let mut res = status.into_response();
    res.headers_mut().insert(LOCATION, location);
    res
}
