//! Upstream value types and error definitions.

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode};
use thiserror::Error;

/// Content type assumed when the upstream omits the header.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Rejections produced while resolving a local request to an upstream URL.
///
/// The display strings are the exact plain-text bodies sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Sub-page path does not start with `/tanka/`.
    #[error("Invalid path")]
    InvalidPath,

    /// Asset request without a `url` parameter.
    #[error("Missing url")]
    MissingUrl,

    /// Asset `url` is unparseable or not http(s).
    #[error("Invalid url")]
    InvalidUrl,
}

/// Transport-level failure talking to the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Proxy fetch failed: {0}")]
pub struct FetchError(pub String);

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's top-level message hides the interesting part
        // (e.g. "Connection refused") in the source chain.
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self(message)
    }
}

/// A response received from the upstream, whatever its status.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Upstream status, kept for logging; never forwarded to the client.
    pub status: StatusCode,
    /// Raw body bytes.
    pub body: Bytes,
    /// Upstream `Content-Type`, or [`DEFAULT_CONTENT_TYPE`].
    pub content_type: HeaderValue,
}

impl UpstreamResponse {
    /// Whether the body should go through the CSS rewriter.
    pub fn is_stylesheet(&self) -> bool {
        self.content_type.as_bytes().starts_with(b"text/css")
    }
}
