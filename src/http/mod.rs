//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, static assets)
//!     → request.rs (request ID, borrowed RequestParts)
//!     → pipeline.rs (locale → route → context → render)
//!     → response.rs (status, redirects, cookies)
//!     → Send to client
//! ```

pub mod pipeline;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestParts, X_REQUEST_ID};
pub use server::{AppState, SiteServer};
