//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the upstream origin
//! - Validate value ranges (local timeout outlasts the upstream fetch)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;
use crate::upstream::FETCH_TIMEOUT;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("upstream.origin '{0}' is not an absolute http(s) URL")]
    Origin(String),

    #[error("static_files.root must not be empty")]
    EmptyStaticRoot,

    #[error("timeouts.request_secs ({got}) must be greater than the {fetch}s upstream fetch timeout")]
    RequestTimeoutTooShort { got: u64, fetch: u64 },

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check a parsed configuration, collecting every violation.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let origin_ok = Url::parse(&config.upstream.origin)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if !origin_ok {
        errors.push(ValidationError::Origin(config.upstream.origin.clone()));
    }

    if config.static_files.root.trim().is_empty() {
        errors.push(ValidationError::EmptyStaticRoot);
    }

    // The local deadline must outlast the fetch, or a hung upstream is
    // answered 408 instead of 502.
    let fetch_secs = FETCH_TIMEOUT.as_secs();
    if config.timeouts.request_secs <= fetch_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            got: config.timeouts.request_secs,
            fetch: fetch_secs,
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
