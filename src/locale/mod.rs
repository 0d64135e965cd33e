//! Locale negotiation subsystem.
//!
//! # Data Flow
//! ```text
//! Request (query override, cookie, Accept-Language)
//!     → negotiate.rs (parse headers)
//!     → resolver.rs (priority: query > cookie > header > default)
//!     → LocaleResolution (locale ∈ LocaleSet, cookie update flag)
//! ```
//!
//! # Design Decisions
//! - Resolution never fails; the default locale is the floor
//! - Pure functions over borrowed request data

pub mod negotiate;
pub mod resolver;
pub mod set;

pub use resolver::{resolve_locale, LocaleInputs, LocaleResolution, LocaleSource};
pub use set::{LocaleError, LocaleSet};
