//! Author page responder middleware.
//!
//! Runs in front of upstream forwarding. For author archive requests
//! outside admin/async/cron/API contexts it produces the response itself —
//! an error page for 404/410, a redirect for everything else — and the
//! rest of the pipeline, including the upstream, never runs.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::gate::{not_found, redirect};
use crate::http::server::AppState;

pub async fn author_gate(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let gate = &state.gate;

    if !gate.is_author_request(req.uri()) || gate.is_excluded_context(&req) {
        return next.run(req).await;
    }

    let config = gate.config();
    let status_code = gate.overrides().status_code(config.status_code);

    // 404 and 410 take the error branch; everything else redirects.
    if matches!(status_code, 404 | 410) {
        tracing::info!(
            path = %req.uri().path(),
            status = status_code,
            "Author archive blocked"
        );
        return not_found::respond(config, status_code);
    }

    let status = redirect::coerce_status(status_code);

    let default_target = if config.redirect_url.is_empty() {
        config.home_url.clone()
    } else {
        config.redirect_url.clone()
    };
    let target = gate.overrides().redirect_url(default_target);
    let target = if target.is_empty() {
        config.home_url.clone()
    } else {
        target
    };
    let target = redirect::sanitize_target(&target, &config.home_url, &config.allowed_redirect_hosts);

    tracing::info!(
        path = %req.uri().path(),
        status = %status,
        target = %target,
        "Author archive redirected"
    );
    redirect::respond(status, &target)
}
