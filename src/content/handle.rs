//! Shared, atomically replaceable content snapshot.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::content::store::ContentStore;

/// Process-wide handle to the current [`ContentStore`].
///
/// Readers take a cheap `Arc` to the snapshot that was current when they
/// asked; `publish` swaps in a new one without blocking them.
#[derive(Clone)]
pub struct ContentHandle {
    inner: Arc<ArcSwap<ContentStore>>,
}

impl ContentHandle {
    pub fn new(store: ContentStore) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(store)),
        }
    }

    /// The snapshot current at the time of the call.
    pub fn snapshot(&self) -> Arc<ContentStore> {
        self.inner.load_full()
    }

    /// Replace the current snapshot.
    pub fn publish(&self, store: ContentStore) {
        let documents = store.document_count();
        self.inner.store(Arc::new(store));
        tracing::info!(documents, "Published content snapshot");
    }
}

impl std::fmt::Debug for ContentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentHandle")
            .field("documents", &self.inner.load().document_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::doc;
    use crate::locale::LocaleSet;

    #[test]
    fn test_publish_leaves_old_snapshot_intact() {
        let locales = LocaleSet::new(["en-US"], "en-US").unwrap();
        let mut first = ContentStore::new(locales.clone());
        first.insert(doc("apps", "atom", "en-US", 0)).unwrap();
        let handle = ContentHandle::new(first);

        let before = handle.snapshot();

        let mut second = ContentStore::new(locales);
        second.insert(doc("apps", "slack", "en-US", 0)).unwrap();
        handle.publish(second);

        assert!(before.lookup("apps", "atom", "en-US").is_some());
        let after = handle.snapshot();
        assert!(after.lookup("apps", "atom", "en-US").is_none());
        assert!(after.lookup("apps", "slack", "en-US").is_some());
    }
}
