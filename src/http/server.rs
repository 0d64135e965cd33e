//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the page handler as fallback service
//! - Serve prebuilt static assets ahead of pages
//! - Wire up middleware (tracing, timeout, request ID, security headers)
//! - Publish reloaded content snapshots
//! - Bind server to listener with graceful shutdown

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    handler::Handler,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{LocaleConfig, SiteConfig};
use crate::content::{ContentHandle, ContentStore};
use crate::http::pipeline;
use crate::http::request::{MakeRequestUuidV4, RequestParts};
use crate::observability::metrics;
use crate::render::{Renderer, SiteMeta};
use crate::routing::SiteRouter;
use crate::security::headers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub content: ContentHandle,
    pub router: Arc<SiteRouter>,
    pub renderer: Arc<dyn Renderer>,
    pub site: Arc<SiteMeta>,
    pub locale_config: Arc<LocaleConfig>,
}

/// HTTP server for the site.
pub struct SiteServer {
    router: Router,
    state: AppState,
}

impl SiteServer {
    /// Create a new server over an initial content snapshot.
    pub fn new(config: SiteConfig, store: ContentStore, renderer: Arc<dyn Renderer>) -> Self {
        let state = AppState {
            content: ContentHandle::new(store),
            router: Arc::new(SiteRouter::new(config.site.maintainers_join_url.clone())),
            renderer,
            site: Arc::new(SiteMeta::from_config(&config)),
            locale_config: Arc::new(config.locales.clone()),
        };

        let router = Self::build_router(&config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SiteConfig, state: AppState) -> Router {
        let pages = page_handler.with_state(state);

        let router = match &config.static_files.dir {
            Some(dir) => {
                let assets = ServeDir::new(PathBuf::from(dir))
                    .append_index_html_on_directories(false)
                    .call_fallback_on_method_not_allowed(true)
                    .fallback(pages);
                Router::new().fallback_service(assets)
            }
            None => Router::new().fallback_service(pages),
        };

        headers::apply_security_headers(router, config.security.enable_headers)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router, e.g. for driving requests in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle to the live content snapshot.
    pub fn content(&self) -> &ContentHandle {
        &self.state.content
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Snapshots arriving on `content_updates` are published as they come;
    /// the server stops when `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut content_updates: mpsc::UnboundedReceiver<ContentStore>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let content = self.state.content.clone();
        tokio::spawn(async move {
            while let Some(store) = content_updates.recv().await {
                metrics::record_content_reload(store.document_count());
                content.publish(store);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Renders every page route; see [`pipeline`].
async fn page_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let parts = RequestParts::from_request(&request, &state.locale_config.cookie_name);

    let (route, response) = pipeline::handle(&state, &parts);

    metrics::record_request(route, response.status().as_u16(), start_time);
    response
}
