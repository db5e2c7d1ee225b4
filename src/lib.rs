//! author-gate — an HTTP gateway that disables author archive pages.
//!
//! Sits in front of a site and intercepts requests to its author archive
//! pages, answering them with a configurable error status (404/410) or an
//! HTTP redirect (301/302/307/308) before the origin ever sees them. Author
//! responses that do pass through have their canonical `Link` header
//! stripped, and admin pages get an inline script injected that removes the
//! author-related blocks from the editor's block registry. All other
//! traffic is forwarded to the origin untouched.

pub mod admin;
pub mod config;
pub mod gate;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use gate::Overrides;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
