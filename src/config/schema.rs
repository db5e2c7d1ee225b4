//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Origin server the gateway forwards to.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Author page gating policy.
    pub gate: GateConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Origin server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin address (e.g., "127.0.0.1:3000"). Plain HTTP.
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Author page gating policy.
///
/// `status_code` selects the behavior for author archive requests:
/// 404 / 410 answer with an error page, 301 / 302 / 307 / 308 redirect to
/// `redirect_url`. Any other value is treated as a redirect and coerced
/// to 301 at the decision point.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GateConfig {
    /// Master switch. When false the gateway is a transparent proxy.
    pub enabled: bool,

    /// The site's public home URL. Default redirect target and the base
    /// host for redirect safety checks.
    pub home_url: String,

    /// HTTP status code for author archive requests.
    pub status_code: u16,

    /// Redirect target for 3xx status codes. Empty means the home URL.
    pub redirect_url: String,

    /// Path prefixes identifying author archive pages (and their feeds).
    pub author_path_prefixes: Vec<String>,

    /// Path prefixes identifying the site's admin area.
    pub admin_path_prefixes: Vec<String>,

    /// Path prefixes identifying the site's API.
    pub api_path_prefixes: Vec<String>,

    /// Exact paths of background task endpoints.
    pub cron_paths: Vec<String>,

    /// Hosts allowed as redirect targets besides the home URL's host.
    pub allowed_redirect_hosts: Vec<String>,

    /// Site 404 template served verbatim on the error branch, if readable.
    pub not_found_template: Option<PathBuf>,

    /// Title of the built-in not-found page.
    pub not_found_title: String,

    /// Heading of the built-in not-found page.
    pub not_found_heading: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            home_url: "http://localhost:8080/".to_string(),
            status_code: 404,
            redirect_url: String::new(),
            author_path_prefixes: vec!["/author/".to_string()],
            admin_path_prefixes: vec!["/wp-admin".to_string()],
            api_path_prefixes: vec!["/wp-json".to_string()],
            cron_paths: vec!["/wp-cron.php".to_string()],
            allowed_redirect_hosts: Vec::new(),
            not_found_template: None,
            not_found_title: "Not Found".to_string(),
            not_found_heading: "404 Not Found".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
