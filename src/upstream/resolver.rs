//! Mapping of local API requests onto upstream URLs.
//!
//! # Responsibilities
//! - List page: `source` selects the popular listing or the newest one
//! - Sub-page: validate the `/tanka/` shape and join onto the origin
//! - Asset: accept any absolute http(s) URL unchanged
//!
//! # Design Decisions
//! - Pure functions over an immutable origin; no I/O
//! - Joins use RFC 3986 reference resolution (`Url::join`)

use url::Url;

use crate::upstream::types::ResolveError;

/// `source` used when the list request does not name one.
pub const DEFAULT_SOURCE: &str = "popular";

/// Source value that selects the newest-items collection.
const NEW_SOURCE: &str = "new";

/// Required prefix for sub-page paths.
const PAGE_PREFIX: &str = "/tanka/";

/// Resolves the three request shapes against one upstream origin.
#[derive(Debug, Clone)]
pub struct UpstreamResolver {
    origin: Url,
}

impl UpstreamResolver {
    /// Create a resolver for the given absolute origin.
    pub fn new(origin: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            origin: Url::parse(origin)?,
        })
    }

    /// Upstream URL for the list page.
    ///
    /// Exactly `"new"` selects `/tanka`; every other value the root listing.
    pub fn list(&self, source: &str) -> Url {
        let path = if source == NEW_SOURCE { "/tanka" } else { "/" };
        let mut url = self.origin.clone();
        url.set_path(path);
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    /// Upstream URL for a sub-page.
    pub fn page(&self, path: &str) -> Result<Url, ResolveError> {
        if !path.starts_with(PAGE_PREFIX) {
            return Err(ResolveError::InvalidPath);
        }
        self.origin.join(path).map_err(|_| ResolveError::InvalidPath)
    }

    /// Upstream URL for an arbitrary asset.
    pub fn asset(&self, raw: &str) -> Result<Url, ResolveError> {
        if raw.is_empty() {
            return Err(ResolveError::MissingUrl);
        }
        let url = Url::parse(raw).map_err(|_| ResolveError::InvalidUrl)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ResolveError::InvalidUrl),
        }
    }
}
