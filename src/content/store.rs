//! Immutable, indexed content snapshot.
//!
//! # Responsibilities
//! - Look up a document by (category, slug, locale)
//! - List a category in display order for a locale
//! - Serve merged per-locale string catalogs
//!
//! # Design Decisions
//! - Missing translations degrade to the default locale, per document
//! - Built once by the loader, never mutated afterwards
//! - Documents are `Arc`-shared so pages can hold them without copying

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::content::document::{sort_key, Category, ContentDocument};
use crate::content::ContentError;
use crate::locale::LocaleSet;

type Catalog = BTreeMap<String, String>;

/// One published generation of site content.
#[derive(Debug, Clone)]
pub struct ContentStore {
    locales: LocaleSet,
    /// category → locale → documents
    categories: HashMap<String, HashMap<String, Category>>,
    /// Catalogs as read from disk.
    raw_strings: HashMap<String, Catalog>,
    /// Catalogs with default-locale entries filled in.
    strings: HashMap<String, Catalog>,
}

impl ContentStore {
    pub fn new(locales: LocaleSet) -> Self {
        Self {
            locales,
            categories: HashMap::new(),
            raw_strings: HashMap::new(),
            strings: HashMap::new(),
        }
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Add a document. Its locale must be supported and its slug unique
    /// within (category, locale).
    pub fn insert(&mut self, doc: ContentDocument) -> Result<(), ContentError> {
        let Some(locale) = self.locales.canonical(&doc.locale).map(str::to_string) else {
            return Err(ContentError::UnsupportedLocale(doc.locale));
        };
        let doc = ContentDocument { locale, ..doc };
        self.categories
            .entry(doc.category.clone())
            .or_default()
            .entry(doc.locale.clone())
            .or_default()
            .insert(doc)
    }

    /// Register a locale's string catalog, replacing any previous one.
    pub fn set_strings(&mut self, locale: &str, catalog: Catalog) -> Result<(), ContentError> {
        let Some(locale) = self.locales.canonical(locale).map(str::to_string) else {
            return Err(ContentError::UnsupportedLocale(locale.to_string()));
        };
        self.raw_strings.insert(locale, catalog);
        self.merge_strings();
        Ok(())
    }

    /// Document in `locale`, or its default-locale translation.
    pub fn lookup(&self, category: &str, slug: &str, locale: &str) -> Option<&Arc<ContentDocument>> {
        let by_locale = self.categories.get(category)?;
        by_locale
            .get(locale)
            .and_then(|c| c.get(slug))
            .or_else(|| {
                by_locale
                    .get(self.locales.default_locale())
                    .and_then(|c| c.get(slug))
            })
    }

    /// Every document of `category`, preferring `locale` translations and
    /// filling gaps from the default locale. Empty when the category is unknown.
    pub fn list_category(&self, category: &str, locale: &str) -> Vec<Arc<ContentDocument>> {
        let Some(by_locale) = self.categories.get(category) else {
            return Vec::new();
        };
        let requested = by_locale.get(locale);
        let fallback = by_locale
            .get(self.locales.default_locale())
            .filter(|_| locale != self.locales.default_locale());

        let mut docs: Vec<Arc<ContentDocument>> = requested
            .map(|c| c.documents().to_vec())
            .unwrap_or_default();
        if let Some(fallback) = fallback {
            for doc in fallback.documents() {
                let translated = requested.is_some_and(|c| c.get(&doc.slug).is_some());
                if !translated {
                    docs.push(Arc::clone(doc));
                }
            }
        }
        docs.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        docs
    }

    /// Category keys starting with `prefix`, sorted.
    pub fn categories(&self, prefix: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .categories
            .keys()
            .map(String::as_str)
            .filter(|k| k.starts_with(prefix))
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Merged string catalog for `locale`; empty when none was loaded.
    pub fn strings(&self, locale: &str) -> &Catalog {
        static EMPTY: Catalog = BTreeMap::new();
        self.strings
            .get(locale)
            .or_else(|| self.strings.get(self.locales.default_locale()))
            .unwrap_or(&EMPTY)
    }

    /// Total documents across all categories and locales.
    pub fn document_count(&self) -> usize {
        self.categories
            .values()
            .flat_map(|by_locale| by_locale.values())
            .map(Category::len)
            .sum()
    }

    fn merge_strings(&mut self) {
        let default = self
            .raw_strings
            .get(self.locales.default_locale())
            .cloned()
            .unwrap_or_default();
        self.strings = self
            .locales
            .codes()
            .iter()
            .map(|code| {
                let mut merged = default.clone();
                if let Some(own) = self.raw_strings.get(code) {
                    merged.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                (code.clone(), merged)
            })
            .collect();
    }
}
