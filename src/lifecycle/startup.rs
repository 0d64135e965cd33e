//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the locale set from configuration
//! - Load the initial content snapshot and templates
//! - Start the content watcher when enabled
//!
//! # Design Decisions
//! - Fail fast: a missing content root or broken template aborts startup
//! - Subsystems initialize in order, not concurrently

use std::path::Path;
use std::sync::Arc;

use notify::RecommendedWatcher;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::SiteConfig;
use crate::content::{load_store, ContentError, ContentStore, ContentWatcher};
use crate::http::SiteServer;
use crate::locale::{LocaleError, LocaleSet};
use crate::render::{RenderError, TeraRenderer};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid locale configuration: {0}")]
    Locale(#[from] LocaleError),

    #[error("failed to load content: {0}")]
    Content(#[from] ContentError),

    #[error("failed to load templates: {0}")]
    Templates(#[from] RenderError),

    #[error("failed to watch content: {0}")]
    Watch(#[from] notify::Error),
}

/// Everything `main` needs to start serving.
pub struct Startup {
    pub server: SiteServer,
    pub content_updates: mpsc::UnboundedReceiver<ContentStore>,
    /// Kept alive for as long as hot reload should run.
    pub watcher: Option<RecommendedWatcher>,
}

/// Build a ready-to-run server from `config`.
pub fn build(config: SiteConfig) -> Result<Startup, StartupError> {
    let locales = LocaleSet::from_config(&config.locales)?;
    let content_root = Path::new(&config.content.root);

    let store = load_store(content_root, &locales)?;
    let renderer = TeraRenderer::from_dir(Path::new(&config.templates.dir))?;

    let (watcher, content_updates) = if config.content.watch {
        let (watcher, updates) = ContentWatcher::new(content_root, locales);
        (Some(watcher.run()?), updates)
    } else {
        // Sender dropped immediately: the receiver yields None and the
        // publisher task exits.
        let (_, updates) = mpsc::unbounded_channel();
        (None, updates)
    };

    let server = SiteServer::new(config, store, Arc::new(renderer));

    Ok(Startup {
        server,
        content_updates,
        watcher,
    })
}
