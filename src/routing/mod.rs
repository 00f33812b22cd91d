//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered prefix lookup)
//!     → Return: API route or Route::Static
//! ```
//!
//! # Design Decisions
//! - Stateless: the route is a pure function of method and path
//! - No regex in hot path (prefix matching only)
//! - First match wins; `/api/tanka-page` is checked before `/api/tanka`

pub mod router;

pub use router::Route;
