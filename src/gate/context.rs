//! Request classification.
//!
//! # Responsibilities
//! - Recognize author archive requests (path prefix or `author=<id>` query)
//! - Recognize contexts the gate must not touch (async in-page requests)
//!
//! # Design Decisions
//! - Path matching is prefix-based and case-sensitive, so author feeds
//!   (`/author/jane/feed/`) are covered by the archive prefix
//! - The `author` query parameter form counts only with a numeric id

use axum::http::HeaderMap;

/// True if `path` starts with any of the given prefixes.
pub fn matches_prefix(path: &str, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|prefix| !prefix.is_empty() && path.starts_with(prefix.as_str()))
}

/// True if the query string selects an author archive (`author=<id>`).
pub fn has_author_query(query: Option<&str>) -> bool {
    let Some(query) = query else {
        return false;
    };
    query.split('&').any(|pair| {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next().unwrap_or("");
        let value = parts.next().unwrap_or("");
        key == "author" && !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
    })
}

/// True for in-page asynchronous requests (XMLHttpRequest).
pub fn is_async_request(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.eq_ignore_ascii_case("XMLHttpRequest"))
        .unwrap_or(false)
}
