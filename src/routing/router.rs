//! Route lookup and content resolution.
//!
//! # Responsibilities
//! - Store the ordered rule table
//! - Find the first rule matching a request path
//! - Turn the match into a page, a redirect, a locale switch or NotFound
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over a short rule list; declaration order is precedence
//! - Explicit NotFound rather than silent default
//! - Pure: reads only the request and the content snapshot it is handed

use std::sync::Arc;

use serde::Serialize;

use crate::content::{ContentDocument, ContentStore};
use crate::routing::matcher::{
    MatchOutcome, Matcher, Params, PathPattern, TrailingSlashMatcher, VersionedDocsMatcher,
};

const PAGES: &str = "pages";
const APPS: &str = "apps";
const DOCS_PREFIX: &str = "docs/";
const USERLAND: &str = "userland";
const RELEASES: &str = "releases";

/// Which rule handled a request. Doubles as a low-cardinality metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    TrailingSlash,
    Home,
    Apps,
    AppAlias,
    App,
    VersionedDocs,
    DocsIndex,
    DocsAll,
    DocsCategory,
    Doc,
    UserlandIndex,
    Userland,
    MaintainersJoin,
    Community,
    Languages,
    LanguageSwitch,
    Contact,
    Releases,
    Unmatched,
}

impl RouteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::TrailingSlash => "trailing_slash",
            RouteKind::Home => "home",
            RouteKind::Apps => "apps",
            RouteKind::AppAlias => "app_alias",
            RouteKind::App => "app",
            RouteKind::VersionedDocs => "versioned_docs",
            RouteKind::DocsIndex => "docs_index",
            RouteKind::DocsAll => "docs_all",
            RouteKind::DocsCategory => "docs_category",
            RouteKind::Doc => "doc",
            RouteKind::UserlandIndex => "userland_index",
            RouteKind::Userland => "userland",
            RouteKind::MaintainersJoin => "maintainers_join",
            RouteKind::Community => "community",
            RouteKind::Languages => "languages",
            RouteKind::LanguageSwitch => "language_switch",
            RouteKind::Contact => "contact",
            RouteKind::Releases => "releases",
            RouteKind::Unmatched => "unmatched",
        }
    }
}

/// A doc category as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Full category key, e.g. `docs/api`.
    pub key: String,
    /// Last path segment, e.g. `api`.
    pub name: String,
    pub href: String,
    pub count: usize,
}

impl CategorySummary {
    fn new(key: &str, count: usize) -> Self {
        Self {
            key: key.to_string(),
            name: key.strip_prefix(DOCS_PREFIX).unwrap_or(key).to_string(),
            href: format!("/{}", key),
            count,
        }
    }
}

/// A renderable page and the content it needs.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Page {
    Home {
        document: Option<Arc<ContentDocument>>,
    },
    Apps {
        apps: Vec<Arc<ContentDocument>>,
        query: Option<String>,
    },
    App {
        document: Arc<ContentDocument>,
    },
    DocsIndex {
        categories: Vec<CategorySummary>,
    },
    DocsAll {
        documents: Vec<Arc<ContentDocument>>,
    },
    DocsCategory {
        category: CategorySummary,
        documents: Vec<Arc<ContentDocument>>,
    },
    Doc {
        category: CategorySummary,
        document: Arc<ContentDocument>,
    },
    UserlandIndex {
        documents: Vec<Arc<ContentDocument>>,
    },
    Userland {
        document: Arc<ContentDocument>,
    },
    Community {
        document: Option<Arc<ContentDocument>>,
    },
    Languages {
        locales: Vec<String>,
    },
    Contact {
        document: Option<Arc<ContentDocument>>,
    },
    Releases {
        releases: Vec<Arc<ContentDocument>>,
    },
}

impl Page {
    /// Template file rendering this page.
    pub fn template(&self) -> &'static str {
        match self {
            Page::Home { .. } => "home.html",
            Page::Apps { .. } => "apps/index.html",
            Page::App { .. } => "apps/show.html",
            Page::DocsIndex { .. } => "docs/index.html",
            Page::DocsAll { .. } => "docs/all.html",
            Page::DocsCategory { .. } => "docs/category.html",
            Page::Doc { .. } => "docs/show.html",
            Page::UserlandIndex { .. } => "userland/index.html",
            Page::Userland { .. } => "userland/show.html",
            Page::Community { .. } => "community.html",
            Page::Languages { .. } => "languages.html",
            Page::Contact { .. } => "contact.html",
            Page::Releases { .. } => "releases.html",
        }
    }

    /// Navigation section to highlight.
    pub fn section(&self) -> Option<&'static str> {
        match self {
            Page::Home { .. } => None,
            Page::Apps { .. } | Page::App { .. } => Some("apps"),
            Page::DocsIndex { .. }
            | Page::DocsAll { .. }
            | Page::DocsCategory { .. }
            | Page::Doc { .. } => Some("docs"),
            Page::UserlandIndex { .. } | Page::Userland { .. } => Some("userland"),
            Page::Community { .. } => Some("community"),
            Page::Languages { .. } => Some("languages"),
            Page::Contact { .. } => Some("contact"),
            Page::Releases { .. } => Some("releases"),
        }
    }

    /// Page heading, without the site title suffix. `None` for the home page.
    pub fn heading(&self) -> Option<String> {
        let from_doc = |doc: &Option<Arc<ContentDocument>>, fallback: &str| {
            doc.as_ref()
                .map(|d| d.title.clone())
                .unwrap_or_else(|| fallback.to_string())
        };
        match self {
            Page::Home { .. } => None,
            Page::Apps { .. } => Some("Apps".to_string()),
            Page::App { document } | Page::Userland { document } => Some(document.title.clone()),
            Page::Doc { document, .. } => Some(document.title.clone()),
            Page::DocsIndex { .. } => Some("Documentation".to_string()),
            Page::DocsAll { .. } => Some("All Documentation".to_string()),
            Page::DocsCategory { category, .. } => Some(category.name.clone()),
            Page::UserlandIndex { .. } => Some("Userland".to_string()),
            Page::Community { document } => Some(from_doc(document, "Community")),
            Page::Languages { .. } => Some("Languages".to_string()),
            Page::Contact { document } => Some(from_doc(document, "Contact")),
            Page::Releases { .. } => Some("Releases".to_string()),
        }
    }
}

/// Where to send the client instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    /// 301 when true, 302 otherwise.
    pub permanent: bool,
}

impl Redirect {
    pub fn permanent(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            permanent: true,
        }
    }

    pub fn temporary(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            permanent: false,
        }
    }
}

/// Outcome of resolving one request.
#[derive(Debug, Clone)]
pub enum RouteMatch {
    Found(Page),
    Redirect(Redirect),
    /// Persist this (supported) locale and send the client back.
    SwitchLocale(String),
    NotFound,
}

/// The parts of a request the router looks at.
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    /// Already-resolved locale.
    pub locale: &'a str,
}

impl RouteRequest<'_> {
    pub fn query_param(&self, name: &str) -> Option<String> {
        query_param(self.query, name)
    }
}

/// First decoded value of query parameter `name`.
pub fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// The rule that handled a request and what it resolved to.
#[derive(Debug, Clone)]
pub struct Routed {
    pub kind: RouteKind,
    pub outcome: RouteMatch,
}

#[derive(Debug)]
struct Rule {
    kind: RouteKind,
    matcher: Box<dyn Matcher>,
}

impl Rule {
    fn pattern(kind: RouteKind, pattern: &str) -> Self {
        Self {
            kind,
            matcher: Box::new(PathPattern::new(pattern)),
        }
    }
}

/// Ordered routing table for the site.
#[derive(Debug)]
pub struct SiteRouter {
    rules: Vec<Rule>,
    maintainers_join_url: String,
}

impl SiteRouter {
    pub fn new(maintainers_join_url: impl Into<String>) -> Self {
        let rules = vec![
            Rule {
                kind: RouteKind::TrailingSlash,
                matcher: Box::new(TrailingSlashMatcher),
            },
            Rule::pattern(RouteKind::Home, "/"),
            Rule::pattern(RouteKind::Apps, "/apps"),
            Rule::pattern(RouteKind::AppAlias, "/app/:slug"),
            Rule::pattern(RouteKind::App, "/apps/:slug"),
            Rule {
                kind: RouteKind::VersionedDocs,
                matcher: Box::new(VersionedDocsMatcher),
            },
            Rule::pattern(RouteKind::DocsIndex, "/docs"),
            Rule::pattern(RouteKind::DocsAll, "/docs/all"),
            Rule::pattern(RouteKind::DocsCategory, "/docs/:category"),
            Rule::pattern(RouteKind::Doc, "/docs/:category/*"),
            Rule::pattern(RouteKind::UserlandIndex, "/userland"),
            Rule::pattern(RouteKind::Userland, "/userland/*"),
            Rule::pattern(RouteKind::MaintainersJoin, "/maintainers/join"),
            Rule::pattern(RouteKind::Community, "/community"),
            Rule::pattern(RouteKind::Languages, "/languages"),
            Rule::pattern(RouteKind::LanguageSwitch, "/languages/:locale"),
            Rule::pattern(RouteKind::Contact, "/contact"),
            Rule::pattern(RouteKind::Releases, "/releases"),
        ];
        Self {
            rules,
            maintainers_join_url: maintainers_join_url.into(),
        }
    }

    /// First matching rule, or `None` when nothing matches.
    pub fn match_path(&self, path: &str) -> Option<(RouteKind, Params)> {
        self.rules.iter().find_map(|rule| match rule.matcher.match_path(path) {
            MatchOutcome::Matched(params) => Some((rule.kind, params)),
            MatchOutcome::Unmatched => None,
        })
    }

    /// Resolve a request against a content snapshot.
    pub fn resolve(&self, request: &RouteRequest<'_>, store: &ContentStore) -> Routed {
        let Some((kind, params)) = self.match_path(request.path) else {
            return Routed {
                kind: RouteKind::Unmatched,
                outcome: RouteMatch::NotFound,
            };
        };
        let outcome = self.dispatch(kind, &params, request, store);
        Routed { kind, outcome }
    }

    fn dispatch(
        &self,
        kind: RouteKind,
        params: &Params,
        request: &RouteRequest<'_>,
        store: &ContentStore,
    ) -> RouteMatch {
        let locale = request.locale;
        let param = |name: &str| params.get(name).unwrap_or_default();
        let rest = params.rest().unwrap_or_default();

        match kind {
            RouteKind::TrailingSlash => {
                let location = match request.query {
                    Some(q) if !q.is_empty() => format!("{}?{}", rest, q),
                    _ => rest.to_string(),
                };
                RouteMatch::Redirect(Redirect::permanent(location))
            }
            RouteKind::Home => found(Page::Home {
                document: store.lookup(PAGES, "home", locale).cloned(),
            }),
            RouteKind::Apps => {
                let query = request
                    .query_param("q")
                    .map(|q| q.trim().to_string())
                    .filter(|q| !q.is_empty());
                let mut apps = store.list_category(APPS, locale);
                if let Some(q) = &query {
                    apps.retain(|doc| app_matches(doc, q));
                }
                found(Page::Apps { apps, query })
            }
            RouteKind::AppAlias => {
                RouteMatch::Redirect(Redirect::permanent(format!("/apps/{}", param("slug"))))
            }
            RouteKind::App => match store.lookup(APPS, param("slug"), locale) {
                Some(doc) => found(Page::App {
                    document: Arc::clone(doc),
                }),
                None => RouteMatch::NotFound,
            },
            RouteKind::VersionedDocs => RouteMatch::Redirect(Redirect::permanent(rest)),
            RouteKind::DocsIndex => {
                let categories = store
                    .categories(DOCS_PREFIX)
                    .into_iter()
                    .map(|key| CategorySummary::new(key, store.list_category(key, locale).len()))
                    .collect();
                found(Page::DocsIndex { categories })
            }
            RouteKind::DocsAll => {
                let documents = store
                    .categories(DOCS_PREFIX)
                    .into_iter()
                    .flat_map(|key| store.list_category(key, locale))
                    .collect();
                found(Page::DocsAll { documents })
            }
            RouteKind::DocsCategory => {
                let key = format!("{}{}", DOCS_PREFIX, param("category"));
                let documents = store.list_category(&key, locale);
                if documents.is_empty() {
                    return RouteMatch::NotFound;
                }
                found(Page::DocsCategory {
                    category: CategorySummary::new(&key, documents.len()),
                    documents,
                })
            }
            RouteKind::Doc => {
                let key = format!("{}{}", DOCS_PREFIX, param("category"));
                match store.lookup(&key, rest, locale) {
                    Some(doc) => found(Page::Doc {
                        category: CategorySummary::new(&key, store.list_category(&key, locale).len()),
                        document: Arc::clone(doc),
                    }),
                    None => RouteMatch::NotFound,
                }
            }
            RouteKind::UserlandIndex => found(Page::UserlandIndex {
                documents: store.list_category(USERLAND, locale),
            }),
            RouteKind::Userland => match store.lookup(USERLAND, rest, locale) {
                Some(doc) => found(Page::Userland {
                    document: Arc::clone(doc),
                }),
                None => RouteMatch::NotFound,
            },
            RouteKind::MaintainersJoin => {
                RouteMatch::Redirect(Redirect::temporary(self.maintainers_join_url.clone()))
            }
            RouteKind::Community => found(Page::Community {
                document: store.lookup(PAGES, "community", locale).cloned(),
            }),
            RouteKind::Languages => found(Page::Languages {
                locales: store.locales().codes().to_vec(),
            }),
            RouteKind::LanguageSwitch => match store.locales().canonical(param("locale")) {
                Some(code) => RouteMatch::SwitchLocale(code.to_string()),
                None => RouteMatch::NotFound,
            },
            RouteKind::Contact => found(Page::Contact {
                document: store.lookup(PAGES, "contact", locale).cloned(),
            }),
            RouteKind::Releases => found(Page::Releases {
                releases: store.list_category(RELEASES, locale),
            }),
            RouteKind::Unmatched => RouteMatch::NotFound,
        }
    }
}

fn found(page: Page) -> RouteMatch {
    RouteMatch::Found(page)
}

fn app_matches(doc: &ContentDocument, query: &str) -> bool {
    let query = query.to_lowercase();
    doc.title.to_lowercase().contains(&query)
        || doc.slug.to_lowercase().contains(&query)
        || doc
            .meta("description")
            .is_some_and(|d| d.to_lowercase().contains(&query))
}
