//! Rendering subsystem.
//!
//! # Data Flow
//! ```text
//! resolved locale + Page (or not-found) + site metadata + strings
//!     → context.rs (pure RenderContext assembly)
//!     → templates.rs (Renderer: context → complete HTML string)
//! ```

pub mod context;
pub mod templates;

pub use context::{ContextBuilder, RenderContext, SiteMeta, NOT_FOUND_HEADING};
pub use templates::{RenderError, Renderer, TeraRenderer};
