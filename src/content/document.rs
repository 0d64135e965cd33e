//! Content documents and categories.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;

use crate::content::ContentError;

/// A single rendered content document. Identified by `(category, slug, locale)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentDocument {
    pub slug: String,
    pub category: String,
    pub title: String,
    /// Rendered HTML.
    pub body: String,
    pub locale: String,
    pub metadata: BTreeMap<String, String>,
    /// Sort key within the category; ties break by slug.
    pub weight: i64,
}

impl ContentDocument {
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// Documents of one category in one locale, kept in display order.
#[derive(Debug, Clone, Default)]
pub struct Category {
    documents: Vec<Arc<ContentDocument>>,
    by_slug: HashMap<String, usize>,
}

impl Category {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, rejecting a second document with the same slug.
    pub fn insert(&mut self, doc: ContentDocument) -> Result<(), ContentError> {
        if self.by_slug.contains_key(&doc.slug) {
            return Err(ContentError::DuplicateSlug {
                category: doc.category,
                slug: doc.slug,
                locale: doc.locale,
            });
        }
        let position = self
            .documents
            .partition_point(|d| sort_key(d) < sort_key(&doc));
        self.documents.insert(position, Arc::new(doc));
        self.reindex_from(position);
        Ok(())
    }

    pub fn get(&self, slug: &str) -> Option<&Arc<ContentDocument>> {
        self.by_slug.get(slug).map(|&i| &self.documents[i])
    }

    pub fn documents(&self) -> &[Arc<ContentDocument>] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Refresh slug positions at and after `start`; earlier entries are unchanged.
    fn reindex_from(&mut self, start: usize) {
        for (i, d) in self.documents.iter().enumerate().skip(start) {
            self.by_slug.insert(d.slug.clone(), i);
        }
    }
}

pub(crate) fn sort_key(doc: &ContentDocument) -> (i64, &str) {
    (doc.weight, doc.slug.as_str())
}

#[cfg(test)]
pub(crate) fn doc(category: &str, slug: &str, locale: &str, weight: i64) -> ContentDocument {
    ContentDocument {
        slug: slug.to_string(),
        category: category.to_string(),
        title: format!("{} ({})", slug, locale),
        body: format!("<p>{}</p>", slug),
        locale: locale.to_string(),
        metadata: BTreeMap::new(),
        weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_orders_by_weight_then_slug() {
        let mut category = Category::new();
        category.insert(doc("apps", "zulu", "en-US", 0)).unwrap();
        category.insert(doc("apps", "alpha", "en-US", 5)).unwrap();
        category.insert(doc("apps", "bravo", "en-US", 0)).unwrap();

        let slugs: Vec<_> = category.documents().iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["bravo", "zulu", "alpha"]);
        assert_eq!(category.get("zulu").unwrap().slug, "zulu");
    }

    #[test]
    fn test_slug_index_tracks_shifted_positions() {
        let mut category = Category::new();
        for (slug, weight) in [("d", 4), ("b", 2), ("e", 5), ("a", 1), ("c", 3)] {
            category.insert(doc("apps", slug, "en-US", weight)).unwrap();
        }

        for slug in ["a", "b", "c", "d", "e"] {
            assert_eq!(category.get(slug).unwrap().slug, slug);
        }
        let slugs: Vec<_> = category.documents().iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_category_rejects_duplicate_slug() {
        let mut category = Category::new();
        category.insert(doc("apps", "same", "en-US", 0)).unwrap();
        let err = category.insert(doc("apps", "same", "en-US", 3)).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug { .. }));
        assert_eq!(category.len(), 1);
    }
}
