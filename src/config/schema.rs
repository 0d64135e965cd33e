//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the site server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    /// Listener configuration (bind address, port, public host).
    pub listener: ListenerConfig,

    /// Static site metadata shared by every page.
    pub site: SiteMetaConfig,

    /// Supported locales and negotiation settings.
    pub locales: LocaleConfig,

    /// Content source settings.
    pub content: ContentConfig,

    /// Template directory.
    pub templates: TemplateConfig,

    /// Prebuilt static assets.
    pub static_files: StaticFilesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub address: String,

    /// TCP port.
    pub port: u16,

    /// Public origin used in absolute links. Derived from the port when unset.
    pub host: Option<String>,
}

impl ListenerConfig {
    /// Socket address string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// Public origin, e.g. `http://localhost:5000`.
    pub fn public_host(&self) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 5000,
            host: None,
        }
    }
}

/// Site-wide metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteMetaConfig {
    /// Site title, appended to every page title.
    pub title: String,

    /// Primary navigation entries, in display order.
    pub nav: Vec<NavEntry>,

    /// External target of `/maintainers/join`.
    pub maintainers_join_url: String,
}

impl Default for SiteMetaConfig {
    fn default() -> Self {
        Self {
            title: "Electron".to_string(),
            nav: vec![
                NavEntry::new("docs", "Docs", "/docs"),
                NavEntry::new("apps", "Apps", "/apps"),
                NavEntry::new("userland", "Userland", "/userland"),
                NavEntry::new("releases", "Releases", "/releases"),
                NavEntry::new("community", "Community", "/community"),
                NavEntry::new("languages", "Languages", "/languages"),
                NavEntry::new("contact", "Contact", "/contact"),
            ],
            maintainers_join_url: "https://goo.gl/FJmZZm".to_string(),
        }
    }
}

/// A navigation link.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct NavEntry {
    /// Section key compared against the page's section to mark it active.
    pub section: String,

    /// Link text.
    pub label: String,

    /// Link target.
    pub href: String,
}

impl NavEntry {
    pub fn new(section: &str, label: &str, href: &str) -> Self {
        Self {
            section: section.to_string(),
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Locale negotiation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Supported locale codes, in display order.
    pub supported: Vec<String>,

    /// Fallback locale. Must be one of `supported`.
    pub default: String,

    /// Cookie persisting the visitor's choice.
    pub cookie_name: String,

    /// Lifetime of the locale cookie in seconds.
    pub cookie_ttl_secs: u64,

    /// Query parameter that overrides every other source.
    pub query_param: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: vec!["en-US".to_string()],
            default: "en-US".to_string(),
            cookie_name: "language".to_string(),
            cookie_ttl_secs: 24 * 60 * 60,
            query_param: "lang".to_string(),
        }
    }
}

/// Content source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Root directory holding one subdirectory per locale.
    pub root: String,

    /// Reload content when files under `root` change.
    pub watch: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: "content".to_string(),
            watch: false,
        }
    }
}

/// Template configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory searched for `**/*.html` templates.
    pub dir: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: "templates".to_string(),
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served ahead of page routes. Disabled when unset.
    pub dir: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Production mode quiets informational logging.
    pub production: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            production: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security response headers.
    pub enable_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
        }
    }
}
