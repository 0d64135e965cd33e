//! Template rendering.

use std::path::Path;

use tera::Tera;
use thiserror::Error;

use crate::render::context::RenderContext;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load templates from {dir}: {message}")]
    Load { dir: String, message: String },

    #[error("failed to render {template}: {message}")]
    Render {
        template: &'static str,
        message: String,
    },
}

/// Turns a context into a complete HTML document.
pub trait Renderer: Send + Sync {
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError>;
}

/// Tera-backed renderer over `<dir>/**/*.html`.
#[derive(Debug)]
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let glob = format!("{}/**/*.html", dir.display());
        let tera = Tera::new(&glob).map_err(|e| RenderError::Load {
            dir: dir.display().to_string(),
            message: error_chain(&e),
        })?;
        tracing::info!(
            dir = %dir.display(),
            templates = tera.get_template_names().count(),
            "Templates loaded"
        );
        Ok(Self { tera })
    }

    /// Build from in-memory `(name, source)` pairs.
    pub fn from_raw(templates: &[(&str, &str)]) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.iter().copied())
            .map_err(|e| RenderError::Load {
                dir: "<memory>".to_string(),
                message: error_chain(&e),
            })?;
        Ok(Self { tera })
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        let template = ctx.page.template;
        let fail = |e: tera::Error| RenderError::Render {
            template,
            message: error_chain(&e),
        };
        let context = tera::Context::from_serialize(ctx).map_err(fail)?;
        self.tera.render(template, &context).map_err(fail)
    }
}

/// Tera nests the useful detail in `source()`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
