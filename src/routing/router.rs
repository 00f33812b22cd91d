//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Map a request onto one of the three API handlers
//! - Fall through to static file serving for everything else
//!
//! # Design Decisions
//! - Only GET reaches the API handlers
//! - Prefix match on the path only; the query string plays no part
//! - Explicit `Static` variant rather than a silent default

use axum::http::Method;

/// Where a request is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/api/tanka-page`: one upstream sub-page.
    TankaPage,
    /// `/api/tanka`: the upstream listing.
    TankaList,
    /// `/api/asset`: any upstream asset, stylesheets rewritten.
    Asset,
    /// Anything else: local static files.
    Static,
}

/// Checked in order; `/api/tanka` is a prefix of `/api/tanka-page`.
const API_PREFIXES: [(&str, Route); 3] = [
    ("/api/tanka-page", Route::TankaPage),
    ("/api/tanka", Route::TankaList),
    ("/api/asset", Route::Asset),
];

impl Route {
    /// Resolve the route for a request.
    pub fn for_request(method: &Method, path: &str) -> Self {
        if *method != Method::GET {
            return Route::Static;
        }
        API_PREFIXES
            .iter()
            .find(|(prefix, _)| path.starts_with(*prefix))
            .map(|(_, route)| *route)
            .unwrap_or(Route::Static)
    }

    /// Label used in logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Route::TankaPage => "tanka_page",
            Route::TankaList => "tanka_list",
            Route::Asset => "asset",
            Route::Static => "static",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_checked_before_list() {
        assert_eq!(Route::for_request(&Method::GET, "/api/tanka-page"), Route::TankaPage);
        assert_eq!(Route::for_request(&Method::GET, "/api/tanka-pages/x"), Route::TankaPage);
        assert_eq!(Route::for_request(&Method::GET, "/api/tanka"), Route::TankaList);
        assert_eq!(Route::for_request(&Method::GET, "/api/tanka-pag"), Route::TankaList);
    }

    #[test]
    fn test_plain_prefix_semantics() {
        assert_eq!(Route::for_request(&Method::GET, "/api/tankas"), Route::TankaList);
        assert_eq!(Route::for_request(&Method::GET, "/api/asset/x"), Route::Asset);
        assert_eq!(Route::for_request(&Method::GET, "/api/assets"), Route::Asset);
    }

    #[test]
    fn test_everything_else_is_static() {
        for path in ["/", "/index.html", "/api", "/api/", "/api/other", "/API/tanka", "/static/api/tanka"] {
            assert_eq!(Route::for_request(&Method::GET, path), Route::Static, "path {path:?}");
        }
    }

    #[test]
    fn test_non_get_never_reaches_api() {
        for method in [Method::POST, Method::HEAD, Method::PUT, Method::DELETE] {
            assert_eq!(Route::for_request(&method, "/api/tanka"), Route::Static);
            assert_eq!(Route::for_request(&method, "/api/asset"), Route::Static);
        }
    }
}
