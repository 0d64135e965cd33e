//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (add nosniff, frame options, referrer policy)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Never overwrite a header the handler chose explicitly

pub mod headers;

pub use headers::apply_security_headers;
