//! Content subsystem.
//!
//! # Data Flow
//! ```text
//! content root (Markdown + TOML front matter, strings.toml)
//!     → loader.rs (walk, parse, render Markdown)
//!     → store.rs (ContentStore: indexed, immutable)
//!     → handle.rs (ArcSwap publish, lock-free reads)
//!
//! On change:
//!     watcher.rs detects change
//!     → loader.rs builds a new ContentStore
//!     → channel → server publishes the snapshot
//!     → in-flight requests finish on the old one
//! ```
//!
//! # Design Decisions
//! - Snapshots are replaced wholesale, never patched
//! - A failed reload keeps the current snapshot
//! - Translations fall back to the default locale per document

use std::path::PathBuf;

use thiserror::Error;

pub mod document;
pub mod handle;
pub mod loader;
pub mod store;
pub mod watcher;

pub use document::{Category, ContentDocument};
pub use handle::ContentHandle;
pub use loader::load_store;
pub use store::ContentStore;
pub use watcher::ContentWatcher;

/// Errors raised while building a content snapshot.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("invalid TOML in {path}: {message}")]
    Toml { path: PathBuf, message: String },

    #[error("duplicate slug '{slug}' in category '{category}' ({locale})")]
    DuplicateSlug {
        category: String,
        slug: String,
        locale: String,
    },

    #[error("locale '{0}' is not supported")]
    UnsupportedLocale(String),
}
