//! Response body rewriting.
//!
//! Only stylesheets are rewritten: every `url(...)` reference is made
//! absolute and wrapped as a proxied `/api/asset` URL so that fonts, images
//! and nested stylesheets are fetched through the proxy as well.

pub mod css;

pub use css::{proxied_asset_url, rewrite};
