//! Canonical URL suppression.
//!
//! # Responsibilities
//! - Suppress the canonical URL of author archive responses
//! - Read and rewrite `Link: <...>; rel="canonical"` response headers
//!
//! # Design Decisions
//! - The suppression rule itself is a pure function of (value, is_author);
//!   header plumbing lives in the middleware around it
//! - Non-canonical Link members are preserved untouched

use axum::body::Body;
use axum::extract::State;
use axum::http::header::LINK;
use axum::http::{HeaderMap, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::http::server::AppState;

/// Return the canonical URL unchanged unless the request is an author
/// archive view, in which case no canonical URL should be emitted.
pub fn suppress_canonical(canonical: Option<String>, is_author: bool) -> Option<String> {
    if is_author {
        None
    } else {
        canonical
    }
}

/// Response stage applying canonical suppression to the `Link` header.
pub async fn canonical_filter(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let is_author = state.gate.is_author_request(req.uri());
    let mut res = next.run(req).await;

    let current = canonical_link(res.headers());
    let resolved = state
        .gate
        .overrides()
        .canonical_url(suppress_canonical(current.clone(), is_author));

    if resolved != current {
        strip_canonical_link(res.headers_mut());
        if let Some(url) = resolved {
            set_canonical_link(res.headers_mut(), &url);
        }
    }

    res
}

/// First canonical target found in the response's `Link` headers.
pub fn canonical_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(split_link_members)
        .find(|member| is_canonical_member(member))
        .and_then(|member| member_target(&member))
}

/// Remove every canonical member from the `Link` headers, keeping the rest.
pub fn strip_canonical_link(headers: &mut HeaderMap) {
    let kept: Vec<String> = headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(|value| {
            split_link_members(value)
                .into_iter()
                .filter(|member| !is_canonical_member(member))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|value| !value.is_empty())
        .collect();

    headers.remove(LINK);
    for value in kept {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.append(LINK, value);
        }
    }
}

fn set_canonical_link(headers: &mut HeaderMap, url: &str) {
    if let Ok(value) = HeaderValue::from_str(&format!("<{url}>; rel=\"canonical\"")) {
        headers.append(LINK, value);
    }
}

/// Split a `Link` header value into members on commas outside `<...>`.
fn split_link_members(value: &str) -> Vec<String> {
    let mut members = Vec::new();
    let mut current = String::new();
    let mut in_target = false;

    for c in value.chars() {
        match c {
            '<' => {
                in_target = true;
                current.push(c);
            }
            '>' => {
                in_target = false;
                current.push(c);
            }
            ',' if !in_target => {
                if !current.trim().is_empty() {
                    members.push(current.trim().to_string());
                }
                current.clear();
            }
            c => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        members.push(current.trim().to_string());
    }
    members
}

fn is_canonical_member(member: &str) -> bool {
    member.split(';').skip(1).any(|param| {
        let param = param.trim().to_ascii_lowercase();
        let Some(rel) = param.strip_prefix("rel=") else {
            return false;
        };
        rel.trim_matches('"')
            .split_ascii_whitespace()
            .any(|token| token == "canonical")
    })
}

fn member_target(member: &str) -> Option<String> {
    let member = member.trim();
    let start = member.find('<')?;
    let end = member.find('>')?;
    (start < end).then(|| member[start + 1..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_page_loses_canonical() {
        assert_eq!(
            suppress_canonical(Some("https://example.com/author/jane".to_string()), true),
            None
        );
    }

    #[test]
    fn test_other_pages_keep_canonical() {
        let url = Some("https://example.com/blog/post".to_string());
        assert_eq!(suppress_canonical(url.clone(), false), url);
        assert_eq!(suppress_canonical(None, false), None);
        assert_eq!(suppress_canonical(None, true), None);
    }

    #[test]
    fn test_canonical_link_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(
                "<https://example.com/style.css>; rel=preload, <https://example.com/a>; rel=\"canonical\"",
            ),
        );

        assert_eq!(
            canonical_link(&headers),
            Some("https://example.com/a".to_string())
        );
    }

    #[test]
    fn test_strip_keeps_other_members() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(
                "<https://example.com/style.css>; rel=preload, <https://example.com/a>; rel=\"canonical\"",
            ),
        );

        strip_canonical_link(&mut headers);

        let remaining = headers.get(LINK).unwrap().to_str().unwrap();
        assert_eq!(remaining, "<https://example.com/style.css>; rel=preload");
        assert_eq!(canonical_link(&headers), None);
    }

    #[test]
    fn test_strip_without_canonical_is_noop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static("<https://example.com/next>; rel=next"),
        );

        strip_canonical_link(&mut headers);
        assert_eq!(
            headers.get(LINK).unwrap().to_str().unwrap(),
            "<https://example.com/next>; rel=next"
        );
    }

    #[test]
    fn test_comma_inside_target_not_split() {
        let members = split_link_members("<https://example.com/a,b>; rel=canonical");
        assert_eq!(members.len(), 1);
        assert_eq!(
            member_target(&members[0]),
            Some("https://example.com/a,b".to_string())
        );
    }
}
