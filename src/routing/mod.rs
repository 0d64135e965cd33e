//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path, query, resolved locale)
//!     → router.rs (ordered rule scan)
//!     → matcher.rs (evaluate one rule: Matched(params) | Unmatched)
//!     → content lookup against the current snapshot
//!     → Return: Found(page) | Redirect | SwitchLocale | NotFound
//! ```
//!
//! # Design Decisions
//! - Rules built at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order); exact paths are declared
//!   ahead of the wildcards that would also cover them

pub mod matcher;
pub mod router;

pub use router::{
    query_param, CategorySummary, Page, Redirect, RouteKind, RouteMatch, RouteRequest, Routed,
    SiteRouter,
};
