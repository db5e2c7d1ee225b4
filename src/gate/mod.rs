//! Author page gating subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → context.rs (author archive? excluded context?)
//!     → responder.rs (error page or redirect, short-circuit)
//!     → [upstream forward for everything else]
//!     → canonical.rs (strip canonical Link header on author responses)
//! ```
//!
//! # Design Decisions
//! - The responder never returns control for a gated request: it produces
//!   the response itself and the upstream is not consulted
//! - Policy values flow through optional override hooks (overrides.rs)
//!   before use; absent hooks mean the built-in defaults
//! - Invalid policy values are normalized, never surfaced as errors

pub mod canonical;
pub mod context;
pub mod not_found;
pub mod overrides;
pub mod redirect;
pub mod responder;

pub use overrides::Overrides;

use axum::body::Body;
use axum::http::{Request, Uri};

use crate::config::GateConfig;

/// Immutable gating policy, built once at startup from config + overrides.
pub struct Gate {
    config: GateConfig,
    overrides: Overrides,
}

impl Gate {
    pub fn new(config: GateConfig, overrides: Overrides) -> Self {
        Self { config, overrides }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Whether the request targets an author archive page (or author feed).
    pub fn is_author_request(&self, uri: &Uri) -> bool {
        context::matches_prefix(uri.path(), &self.config.author_path_prefixes)
            || context::has_author_query(uri.query())
    }

    /// Whether the request runs in a context the gate must leave alone:
    /// admin area, in-page async request, background task, or API.
    pub fn is_excluded_context(&self, req: &Request<Body>) -> bool {
        let path = req.uri().path();
        self.is_admin_path(path)
            || context::matches_prefix(path, &self.config.api_path_prefixes)
            || self.config.cron_paths.iter().any(|p| p == path)
            || context::is_async_request(req.headers())
    }

    pub fn is_admin_path(&self, path: &str) -> bool {
        context::matches_prefix(path, &self.config.admin_path_prefixes)
    }
}
