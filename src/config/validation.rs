//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses and URLs actually parse
//! - Check path lists contain absolute paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Gate policy values (status code, redirect target) are deliberately NOT
//!   validated here; out-of-range values are normalized at the decision
//!   point instead of rejected

use axum::http::uri::Authority;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic configuration error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("upstream.address '{0}' is not a valid host:port authority")]
    InvalidUpstreamAddress(String),

    #[error("gate.home_url '{0}' is not an absolute URL with a host")]
    InvalidHomeUrl(String),

    #[error("gate.redirect_url '{0}' is neither an absolute URL nor a site-relative path")]
    InvalidRedirectUrl(String),

    #[error("gate.{field} entry '{value}' must start with '/'")]
    RelativePathEntry { field: &'static str, value: String },
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if Authority::from_str(&config.upstream.address).is_err() {
        errors.push(ValidationError::InvalidUpstreamAddress(
            config.upstream.address.clone(),
        ));
    }

    match Url::parse(&config.gate.home_url) {
        Ok(url) if url.host_str().is_some() => {}
        _ => errors.push(ValidationError::InvalidHomeUrl(config.gate.home_url.clone())),
    }

    let redirect_url = &config.gate.redirect_url;
    if !redirect_url.is_empty()
        && !redirect_url.starts_with('/')
        && Url::parse(redirect_url).is_err()
    {
        errors.push(ValidationError::InvalidRedirectUrl(redirect_url.clone()));
    }

    let path_lists = [
        ("author_path_prefixes", &config.gate.author_path_prefixes),
        ("admin_path_prefixes", &config.gate.admin_path_prefixes),
        ("api_path_prefixes", &config.gate.api_path_prefixes),
        ("cron_paths", &config.gate.cron_paths),
    ];
    for (field, entries) in path_lists {
        for entry in entries {
            if !entry.starts_with('/') {
                errors.push(ValidationError::RelativePathEntry {
                    field,
                    value: entry.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
