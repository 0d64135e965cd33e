//! Site server
//!
//! Serves a localized marketing and documentation site from a directory of
//! Markdown content and Tera templates.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ tower-http layers (request id, trace, timeout, headers)
//!                         │
//!                         ├──▶ static files (ServeDir, when configured)
//!                         │
//!                         ▼
//!                     http::pipeline
//!                         locale → route → context → render
//!                         │           │
//!                         │           └── content snapshot (ArcSwap)
//!                         │                   ▲
//!                         │                   └── content watcher (notify)
//!                         ▼
//!     Client Response ◀── HTML | redirect | 404 | 500
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use site_server::config::{apply_overrides, load_config, EnvOverrides, SiteConfig};
use site_server::lifecycle::{self, Shutdown};
use site_server::observability;

#[derive(Parser)]
#[command(name = "site-server")]
#[command(about = "Serve the localized site from content and templates", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on. `PORT` in the environment takes precedence.
    #[arg(short, long)]
    port: Option<u16>,

    /// Content root, overriding `content.root`.
    #[arg(long)]
    content: Option<PathBuf>,

    /// Template directory, overriding `templates.dir`.
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Reload content when files change.
    #[arg(long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SiteConfig::default(),
    };
    apply_overrides(&mut config, &EnvOverrides::from_env(), cli.port);
    if let Some(content) = &cli.content {
        config.content.root = content.display().to_string();
    }
    if let Some(templates) = &cli.templates {
        config.templates.dir = templates.display().to_string();
    }
    config.content.watch |= cli.watch;

    observability::init_logging(config.observability.production);

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        host = %config.listener.public_host(),
        content_root = %config.content.root,
        locales = ?config.locales.supported,
        production = config.observability.production,
        "Configuration loaded"
    );

    let bind_address = config.listener.bind_address();
    let metrics_enabled = config.observability.metrics_enabled;
    let metrics_address = config.observability.metrics_address.clone();

    let startup = lifecycle::build(config)?;
    let listener = TcpListener::bind(&bind_address).await?;

    if metrics_enabled {
        match metrics_address.parse() {
            Ok(addr) => observability::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        lifecycle::shutdown_signal().await;
        shutdown.trigger();
    });

    tracing::info!(address = %listener.local_addr()?, "site-server listening");

    // Dropping the watcher stops hot reload, so hold it until exit.
    let _watcher = startup.watcher;
    startup
        .server
        .run(listener, startup.content_updates, shutdown_rx)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
