//! API handlers.
//!
//! Each handler resolves its upstream target, fetches it and shapes the
//! response. Validation failures return before any network call.

use axum::response::Response;

use crate::http::request::QueryParams;
use crate::http::response::{self, ProxyError};
use crate::http::server::AppState;
use crate::rewrite::css;
use crate::upstream::DEFAULT_SOURCE;

/// `GET /api/tanka?source=popular|new`
pub async fn tanka_list(state: &AppState, query: &QueryParams) -> Result<Response, ProxyError> {
    let source = query.first("source").unwrap_or(DEFAULT_SOURCE);
    let target = state.resolver.list(source);

    let upstream = state.fetcher.fetch(&target).await?;
    Ok(response::html(upstream.body))
}

/// `GET /api/tanka-page?path=/tanka/...`
pub async fn tanka_page(state: &AppState, query: &QueryParams) -> Result<Response, ProxyError> {
    let path = query.first("path").unwrap_or_default();
    let target = state.resolver.page(path).inspect_err(|e| {
        tracing::warn!(path = %path, reason = %e, "Rejected sub-page request");
    })?;

    let upstream = state.fetcher.fetch(&target).await?;
    Ok(response::html(upstream.body))
}

/// `GET /api/asset?url=<absolute-url>`
///
/// Stylesheets are rewritten so their references load through this proxy;
/// everything else is returned byte for byte.
pub async fn asset(state: &AppState, query: &QueryParams) -> Result<Response, ProxyError> {
    let raw = query.first("url").unwrap_or_default();
    let target = state.resolver.asset(raw).inspect_err(|e| {
        tracing::warn!(url = %raw, reason = %e, "Rejected asset request");
    })?;

    let upstream = state.fetcher.fetch(&target).await?;
    let body = if upstream.is_stylesheet() {
        css::rewrite(upstream.body, &target)
    } else {
        upstream.body
    };

    Ok(response::proxied(upstream.content_type, body))
}
