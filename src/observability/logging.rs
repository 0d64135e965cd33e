//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Pick a default filter from the run mode
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over the built-in default
//! - Production only quiets informational output; warnings and errors stay

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(production: bool) -> &'static str {
    if production {
        "site_server=warn,tower_http=warn"
    } else {
        "site_server=info,tower_http=info"
    }
}

/// Install the global subscriber.
pub fn init_logging(production: bool) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(production).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
