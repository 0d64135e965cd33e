//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use tower::ServiceExt;

use site_server::config::SiteConfig;
use site_server::render::{RenderContext, RenderError, Renderer};
use site_server::SiteServer;

const MANIFEST_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// Config pointing at the content, templates and static files shipped with
/// the repository.
pub fn repo_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.locales.supported = vec!["en-US".into(), "fr-FR".into()];
    config.content.root = format!("{}/content", MANIFEST_DIR);
    config.templates.dir = format!("{}/templates", MANIFEST_DIR);
    config.static_files.dir = Some(format!("{}/static", MANIFEST_DIR));
    config
}

/// A server over the repository content.
pub fn repo_server() -> SiteServer {
    site_server::lifecycle::build(repo_config())
        .expect("repository content should load")
        .server
}

/// Write `files` (relative path, contents) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, contents) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

/// Drive one request through the router.
pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn header_str<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Renderer that fails every render.
pub struct BrokenRenderer;

impl Renderer for BrokenRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        Err(RenderError::Render {
            template: ctx.page.template,
            message: "template exploded".into(),
        })
    }
}

pub fn broken_renderer() -> Arc<dyn Renderer> {
    Arc::new(BrokenRenderer)
}
