//! Request handling helpers.
//!
//! # Responsibilities
//! - Decode query strings into first-value parameter lookups
//! - Expose the request ID header set by middleware
//!
//! # Design Decisions
//! - `application/x-www-form-urlencoded` decoding (`+` is a space)
//! - Blank values are dropped, so `?path=` reads the same as no `path`

use std::collections::HashMap;

use axum::http::{HeaderName, Request, Uri};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Decoded query parameters; every key maps to all of its values in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Decode a raw query string (without the leading `?`).
    pub fn parse(query: Option<&str>) -> Self {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        if let Some(query) = query {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                if value.is_empty() {
                    continue;
                }
                values
                    .entry(key.into_owned())
                    .or_default()
                    .push(value.into_owned());
            }
        }
        Self { values }
    }

    /// Parameters of a request URI.
    pub fn from_uri(uri: &Uri) -> Self {
        Self::parse(uri.query())
    }

    /// First value of `key`, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Request ID assigned by `SetRequestIdLayer`, or `"unknown"`.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
