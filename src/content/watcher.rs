//! Content directory watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::content::loader::load_store;
use crate::content::store::ContentStore;
use crate::locale::LocaleSet;

/// A watcher that rebuilds the content snapshot when files change.
pub struct ContentWatcher {
    root: PathBuf,
    locales: LocaleSet,
    update_tx: mpsc::UnboundedSender<ContentStore>,
}

impl ContentWatcher {
    /// Create a new ContentWatcher.
    ///
    /// Returns the watcher and a receiver for rebuilt snapshots.
    pub fn new(root: &Path, locales: LocaleSet) -> (Self, mpsc::UnboundedReceiver<ContentStore>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                root: root.to_path_buf(),
                locales,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in a background thread. Dropping the returned watcher
    /// stops it.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let root = self.root.clone();
        let locales = self.locales.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove() {
                        tracing::info!(paths = ?event.paths, "Content change detected, reloading");
                        match load_store(&root, &locales) {
                            Ok(store) => {
                                let _ = tx.send(store);
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "Failed to reload content. Keeping current snapshot.");
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.root, RecursiveMode::Recursive)?;

        tracing::info!(root = ?self.root, "Content watcher started");
        Ok(watcher)
    }
}
