//! Outbound HTTP client for the upstream site.
//!
//! # Responsibilities
//! - Issue one GET per proxied request
//! - Stamp the fixed identity header and enforce the fixed timeout
//! - Buffer the body and report content type
//!
//! # Design Decisions
//! - One pooled `reqwest::Client` shared by all requests (cheap to clone)
//! - Timeout covers connect, headers and body together
//! - Direct connections only; `HTTP(S)_PROXY` variables are ignored
//! - No retries: the first failure is surfaced as a `FetchError`

use std::time::{Duration, Instant};

use axum::http::{header, HeaderValue};
use url::Url;

use crate::observability::metrics;
use crate::upstream::types::{FetchError, UpstreamResponse, DEFAULT_CONTENT_TYPE};

/// Identity sent with every outbound request.
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Deadline for every outbound request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches upstream resources.
#[derive(Debug, Clone)]
pub struct UpstreamFetcher {
    client: reqwest::Client,
}

impl UpstreamFetcher {
    /// Build the shared client.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .no_proxy()
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and buffer the whole response.
    ///
    /// Any received response is `Ok`, including 4xx/5xx.
    pub async fn fetch(&self, url: &Url) -> Result<UpstreamResponse, FetchError> {
        let start = Instant::now();
        let result = self.send(url).await;

        match &result {
            Ok(response) => {
                metrics::record_upstream_fetch("ok", start);
                if !response.status.is_success() {
                    tracing::warn!(
                        url = %url,
                        status = %response.status,
                        "Upstream answered with non-success status"
                    );
                }
            }
            Err(e) => {
                metrics::record_upstream_fetch("error", start);
                tracing::error!(url = %url, error = %e, "Upstream fetch failed");
            }
        }

        result
    }

    async fn send(&self, url: &Url) -> Result<UpstreamResponse, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        let body = response.bytes().await?;

        tracing::debug!(
            url = %url,
            status = %status,
            bytes = body.len(),
            "Fetched upstream resource"
        );

        Ok(UpstreamResponse {
            status,
            body,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one connection, answer with `reply`, return the request head.
    async fn one_shot_upstream(reply: &'static [u8]) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
            }
            socket.write_all(reply).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&head).to_lowercase()
        });
        (Url::parse(&format!("http://{}/style.css", addr)).unwrap(), handle)
    }

    #[tokio::test]
    async fn test_sends_fixed_user_agent() {
        let (url, upstream) = one_shot_upstream(
            b"HTTP/1.1 200 OK\r\nContent-Type: text/css\r\nContent-Length: 4\r\nConnection: close\r\n\r\na{b}",
        )
        .await;

        let response = UpstreamFetcher::new().unwrap().fetch(&url).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type, "text/css");
        assert_eq!(&response.body[..], b"a{b}");

        let head = upstream.await.unwrap();
        assert!(head.starts_with("get /style.css http/1.1"), "head: {head}");
        assert!(head.contains("user-agent: mozilla/5.0\r\n"), "head: {head}");
    }

    #[tokio::test]
    async fn test_error_status_is_still_a_response() {
        let (url, _upstream) = one_shot_upstream(
            b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\noops",
        )
        .await;

        let response = UpstreamFetcher::new().unwrap().fetch(&url).await.unwrap();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.content_type, DEFAULT_CONTENT_TYPE);
        assert_eq!(&response.body[..], b"oops");
    }

    #[test]
    fn test_fetch_timeout_is_ten_seconds() {
        assert_eq!(FETCH_TIMEOUT, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_silent_upstream_times_out() {
        // Accepts the connection and never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _upstream = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });
        let url = Url::parse(&format!("http://{}/", addr)).unwrap();

        let fetcher = UpstreamFetcher::with_timeout(Duration::from_millis(200)).unwrap();
        let start = Instant::now();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(err.to_string().starts_with("Proxy fetch failed: "), "error: {err}");
        assert!(err.to_string().contains("timed out"), "error: {err}");
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_connection_refused_is_fetch_error() {
        let closed = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let url = Url::parse(&format!("http://{}/", closed)).unwrap();

        let err = UpstreamFetcher::new().unwrap().fetch(&url).await.unwrap_err();
        assert!(err.to_string().starts_with("Proxy fetch failed: "));
    }
}
