//! Request pipeline.
//!
//! # Data Flow
//! ```text
//! RequestParts
//!     → locale stage  (LocaleResolution; always succeeds)
//!     → route stage   (Routed: page | redirect | locale switch | not found)
//!     → context stage (RenderContext; pure)
//!     → render stage  (HTML string or 500)
//!     → Response (+ Set-Cookie when the locale cookie is stale)
//! ```
//!
//! # Design Decisions
//! - Stages are plain functions composed here, not middleware
//! - Every stage is total: it yields its output or a terminal response
//! - One content snapshot is pinned for the whole request

use axum::body::Body;
use axum::http::{Response, StatusCode};

use crate::content::ContentStore;
use crate::http::response;
use crate::http::server::AppState;
use crate::http::RequestParts;
use crate::locale::{resolve_locale, LocaleInputs, LocaleResolution};
use crate::render::{ContextBuilder, RenderContext};
use crate::routing::{query_param, Redirect, RouteKind, RouteMatch, RouteRequest, Routed};

/// Run one request through every stage.
pub fn handle(state: &AppState, request: &RequestParts<'_>) -> (RouteKind, Response<Body>) {
    let store = state.content.snapshot();

    let locale = locale_stage(state, &store, request);
    let routed = route_stage(state, &store, request, &locale.locale);

    tracing::debug!(
        request_id = %request.request_id,
        path = %request.path,
        locale = %locale.locale,
        route = routed.kind.as_str(),
        "Request resolved"
    );

    let kind = routed.kind;
    let mut response = respond_stage(state, &store, request, &locale, routed.outcome);

    if locale.update_cookie && !matches!(kind, RouteKind::LanguageSwitch) {
        response::set_locale_cookie(&mut response, &state.locale_config, &locale.locale);
    }
    (kind, response)
}

fn locale_stage(
    state: &AppState,
    store: &ContentStore,
    request: &RequestParts<'_>,
) -> LocaleResolution {
    let requested = query_param(request.query, &state.locale_config.query_param);

    resolve_locale(
        store.locales(),
        LocaleInputs {
            requested: requested.as_deref(),
            cookie: request.locale_cookie,
            accept_language: request.accept_language,
        },
    )
}

fn route_stage(
    state: &AppState,
    store: &ContentStore,
    request: &RequestParts<'_>,
    locale: &str,
) -> Routed {
    if !request.readable {
        return Routed {
            kind: RouteKind::Unmatched,
            outcome: RouteMatch::NotFound,
        };
    }
    let route_request = RouteRequest {
        path: request.path,
        query: request.query,
        locale,
    };
    state.router.resolve(&route_request, store)
}

fn respond_stage(
    state: &AppState,
    store: &ContentStore,
    request: &RequestParts<'_>,
    locale: &LocaleResolution,
    outcome: RouteMatch,
) -> Response<Body> {
    let builder = ContextBuilder {
        site: &state.site,
        locales: store.locales(),
        locale,
        strings: store.strings(&locale.locale),
        path: request.path,
    };

    match outcome {
        RouteMatch::Found(page) => render_stage(state, request, &builder.page(&page), StatusCode::OK),
        RouteMatch::NotFound => {
            render_stage(state, request, &builder.not_found(), StatusCode::NOT_FOUND)
        }
        RouteMatch::Redirect(target) => response::redirect(&target),
        RouteMatch::SwitchLocale(code) => {
            let target = Redirect::temporary(response::return_path(request.referer));
            let mut switched = response::redirect(&target);
            response::set_locale_cookie(&mut switched, &state.locale_config, &code);
            tracing::debug!(request_id = %request.request_id, locale = %code, "Locale switched");
            switched
        }
    }
}

fn render_stage(
    state: &AppState,
    request: &RequestParts<'_>,
    ctx: &RenderContext<'_>,
    status: StatusCode,
) -> Response<Body> {
    match state.renderer.render(ctx) {
        Ok(html) => response::html(status, html),
        Err(e) => {
            tracing::error!(
                request_id = %request.request_id,
                path = %request.path,
                error = %e,
                "Template rendering failed"
            );
            response::internal_error()
        }
    }
}
