//! Render context assembly.
//!
//! Pure: everything the templates see is borrowed from inputs that were
//! resolved earlier in the pipeline.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::{NavEntry, SiteConfig};
use crate::locale::{LocaleResolution, LocaleSet, LocaleSource};
use crate::routing::Page;

/// Heading of the not-found page; the full title appends the site title.
pub const NOT_FOUND_HEADING: &str = "404 Not Found";
pub const NOT_FOUND_TEMPLATE: &str = "404.html";

/// Static site metadata, fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct SiteMeta {
    pub title: String,
    pub host: String,
    pub nav: Vec<NavEntry>,
}

impl SiteMeta {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.site.title.clone(),
            host: config.listener.public_host(),
            nav: config.site.nav.clone(),
        }
    }

    /// `"<heading> | <site title>"`, or just the site title.
    pub fn page_title(&self, heading: Option<&str>) -> String {
        match heading {
            Some(h) if !h.is_empty() => format!("{} | {}", h, self.title),
            _ => self.title.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NavLink<'a> {
    pub label: &'a str,
    pub href: &'a str,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct SiteContext<'a> {
    pub title: &'a str,
    pub host: &'a str,
    pub nav: Vec<NavLink<'a>>,
}

#[derive(Debug, Serialize)]
pub struct LocaleContext<'a> {
    pub code: &'a str,
    pub default: &'a str,
    pub available: &'a [String],
    pub source: LocaleSource,
}

#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub heading: Option<String>,
    pub section: Option<&'static str>,
    pub path: String,
    pub status: u16,
    pub template: &'static str,
}

/// Everything a template can reference.
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    pub site: SiteContext<'a>,
    pub locale: LocaleContext<'a>,
    pub page: PageMeta,
    /// Resolved page payload; absent on the not-found page.
    pub content: Option<&'a Page>,
    pub strings: &'a BTreeMap<String, String>,
}

/// Request-scoped inputs shared by every context built for one request.
#[derive(Debug, Clone, Copy)]
pub struct ContextBuilder<'a> {
    pub site: &'a SiteMeta,
    pub locales: &'a LocaleSet,
    pub locale: &'a LocaleResolution,
    pub strings: &'a BTreeMap<String, String>,
    pub path: &'a str,
}

impl<'a> ContextBuilder<'a> {
    /// Context for a resolved page.
    pub fn page(&self, page: &'a Page) -> RenderContext<'a> {
        let heading = page.heading();
        let meta = PageMeta {
            title: self.site.page_title(heading.as_deref()),
            heading,
            section: page.section(),
            path: self.path.to_string(),
            status: 200,
            template: page.template(),
        };
        self.assemble(meta, Some(page))
    }

    /// Context for the not-found page.
    pub fn not_found(&self) -> RenderContext<'a> {
        let meta = PageMeta {
            title: self.site.page_title(Some(NOT_FOUND_HEADING)),
            heading: Some(NOT_FOUND_HEADING.to_string()),
            section: None,
            path: self.path.to_string(),
            status: 404,
            template: NOT_FOUND_TEMPLATE,
        };
        self.assemble(meta, None)
    }

    fn assemble(&self, page: PageMeta, content: Option<&'a Page>) -> RenderContext<'a> {
        let nav = self
            .site
            .nav
            .iter()
            .map(|entry| NavLink {
                label: self
                    .strings
                    .get(&format!("nav.{}", entry.section))
                    .map(String::as_str)
                    .unwrap_or(&entry.label),
                href: &entry.href,
                active: page.section == Some(entry.section.as_str()),
            })
            .collect();

        RenderContext {
            site: SiteContext {
                title: &self.site.title,
                host: &self.site.host,
                nav,
            },
            locale: LocaleContext {
                code: &self.locale.locale,
                default: self.locales.default_locale(),
                available: self.locales.codes(),
                source: self.locale.source,
            },
            page,
            content,
            strings: self.strings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteMeta {
        SiteMeta::from_config(&SiteConfig::default())
    }

    fn resolution(locale: &str) -> LocaleResolution {
        LocaleResolution {
            locale: locale.to_string(),
            source: LocaleSource::Cookie,
            update_cookie: false,
        }
    }

    #[test]
    fn test_page_context_marks_active_section() {
        let site = site();
        let locales = LocaleSet::new(["en-US", "fr-FR"], "en-US").unwrap();
        let locale = resolution("fr-FR");
        let strings = BTreeMap::from([("nav.docs".to_string(), "Documentation".to_string())]);
        let builder = ContextBuilder {
            site: &site,
            locales: &locales,
            locale: &locale,
            strings: &strings,
            path: "/docs",
        };
        let page = Page::DocsIndex { categories: vec![] };

        let ctx = builder.page(&page);
        assert_eq!(ctx.page.title, "Documentation | Electron");
        assert_eq!(ctx.page.template, "docs/index.html");
        assert_eq!(ctx.locale.code, "fr-FR");
        assert_eq!(ctx.locale.default, "en-US");

        let docs = ctx.site.nav.iter().find(|l| l.href == "/docs").unwrap();
        assert!(docs.active);
        assert_eq!(docs.label, "Documentation");
        assert_eq!(ctx.site.nav.iter().filter(|l| l.active).count(), 1);
    }

    #[test]
    fn test_home_title_is_site_title() {
        let site = site();
        let locales = LocaleSet::new(["en-US"], "en-US").unwrap();
        let locale = resolution("en-US");
        let strings = BTreeMap::new();
        let builder = ContextBuilder {
            site: &site,
            locales: &locales,
            locale: &locale,
            strings: &strings,
            path: "/",
        };
        let page = Page::Home { document: None };
        assert_eq!(builder.page(&page).page.title, "Electron");
    }

    #[test]
    fn test_not_found_context() {
        let site = site();
        let locales = LocaleSet::new(["en-US"], "en-US").unwrap();
        let locale = resolution("en-US");
        let strings = BTreeMap::new();
        let builder = ContextBuilder {
            site: &site,
            locales: &locales,
            locale: &locale,
            strings: &strings,
            path: "/nonexistent-xyz",
        };

        let ctx = builder.not_found();
        assert_eq!(ctx.page.title, "404 Not Found | Electron");
        assert_eq!(ctx.page.status, 404);
        assert!(ctx.content.is_none());
        assert!(ctx.site.nav.iter().all(|l| !l.active));

        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["page"]["path"], "/nonexistent-xyz");
        assert_eq!(json["locale"]["source"], "cookie");
    }
}
