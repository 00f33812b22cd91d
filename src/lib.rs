//! Local forward proxy for the utakatanka.jp tanka site.
//!
//! Serves a local directory and three API endpoints that fetch pages and
//! assets from the upstream site. Stylesheets fetched through
//! `/api/asset` have their `url(...)` references rewritten so nested
//! resources are proxied too.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rewrite;
pub mod routing;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
