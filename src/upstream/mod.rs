//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! query parameters (source / path / url)
//!     → resolver.rs (pure: absolute upstream URL or ResolveError)
//!     → fetcher.rs (one GET, fixed User-Agent and timeout)
//!     → UpstreamResponse or FetchError
//! ```
//!
//! # Design Decisions
//! - Resolution never touches the network; bad input is rejected first
//! - A single outbound attempt per request, no retries
//! - Upstream HTTP status is informational only; any received response
//!   counts as a successful fetch

pub mod fetcher;
pub mod resolver;
pub mod types;

pub use fetcher::{UpstreamFetcher, FETCH_TIMEOUT, USER_AGENT};
pub use resolver::{UpstreamResolver, DEFAULT_SOURCE};
pub use types::{FetchError, ResolveError, UpstreamResponse};
