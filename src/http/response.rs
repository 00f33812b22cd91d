//! Response construction.
//!
//! # Responsibilities
//! - Build the 200 responses for proxied content
//! - Map resolve/fetch failures to 400/502 plain-text responses
//!
//! # Design Decisions
//! - Upstream status is never forwarded; success is always 200
//! - Successful proxied responses are never cached by the client
//! - Error bodies are the error's display string

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::upstream::{FetchError, ResolveError};

/// Content type of list and sub-page responses.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Content type of every error response.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Cache directive on every successful proxied response.
pub const NO_STORE: &str = "no-store";

/// Failure of an API request.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ProxyError {
    /// Status reported to the local client.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Resolve(_) => StatusCode::BAD_REQUEST,
            ProxyError::Fetch(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
            self.to_string(),
        )
            .into_response()
    }
}

/// 200 response carrying proxied content.
pub fn proxied(content_type: HeaderValue, body: Bytes) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE)),
        ],
        Body::from(body),
    )
        .into_response()
}

/// 200 response carrying an upstream HTML page.
pub fn html(body: Bytes) -> Response {
    proxied(HeaderValue::from_static(HTML_CONTENT_TYPE), body)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_error_is_400() {
        let response = ProxyError::from(ResolveError::MissingUrl).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], TEXT_CONTENT_TYPE);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
        assert_eq!(body_string(response).await, "Missing url");
    }

    #[tokio::test]
    async fn test_fetch_error_is_502() {
        let response = ProxyError::from(FetchError("timed out".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_string(response).await, "Proxy fetch failed: timed out");
    }

    #[tokio::test]
    async fn test_html_response_headers() {
        let response = html(Bytes::from_static(b"<p>ok</p>"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], HTML_CONTENT_TYPE);
        assert_eq!(response.headers()[header::CACHE_CONTROL], NO_STORE);
        assert_eq!(body_string(response).await, "<p>ok</p>");
    }

    #[tokio::test]
    async fn test_proxied_keeps_content_type() {
        let response = proxied(HeaderValue::from_static("image/png"), Bytes::from_static(b"\x89PNG"));
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(response.headers()[header::CACHE_CONTROL], NO_STORE);
    }
}
