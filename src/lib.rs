//! Localized marketing and documentation site server.

// Request resolution
pub mod content;
pub mod http;
pub mod locale;
pub mod render;
pub mod routing;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::SiteConfig;
pub use http::SiteServer;
pub use lifecycle::Shutdown;
