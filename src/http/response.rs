//! Response construction.
//!
//! # Responsibilities
//! - Wrap rendered HTML with the right status and content type
//! - Build 301/302 redirects
//! - Attach the locale cookie
//! - Map rendering failures to a bare 500
//!
//! # Design Decisions
//! - Bodies are complete strings; a failed render never leaks partial HTML
//! - Redirect statuses follow the classic 301/302 pair, not 307/308

use axum::body::Body;
use axum::http::{header, HeaderValue, Response, StatusCode};
use axum::response::{Html, IntoResponse};

use crate::config::LocaleConfig;
use crate::routing::Redirect;

pub fn html(status: StatusCode, body: String) -> Response<Body> {
    (status, Html(body)).into_response()
}

pub fn internal_error() -> Response<Body> {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

pub fn redirect(target: &Redirect) -> Response<Body> {
    let status = if target.permanent {
        StatusCode::MOVED_PERMANENTLY
    } else {
        StatusCode::FOUND
    };
    match HeaderValue::from_str(&target.location) {
        Ok(location) => (status, [(header::LOCATION, location)]).into_response(),
        Err(_) => {
            tracing::warn!(location = %target.location, "Redirect target is not a valid header value");
            internal_error()
        }
    }
}

/// `Set-Cookie` value persisting `locale`.
pub fn locale_cookie(config: &LocaleConfig, locale: &str) -> Option<HeaderValue> {
    let cookie = format!(
        "{}={}; Max-Age={}; Path=/; SameSite=Lax",
        config.cookie_name, locale, config.cookie_ttl_secs
    );
    HeaderValue::from_str(&cookie).ok()
}

pub fn set_locale_cookie(response: &mut Response<Body>, config: &LocaleConfig, locale: &str) {
    if let Some(value) = locale_cookie(config, locale) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}

/// Same-site path to return to after a locale switch.
///
/// Only the path and query of the referer are kept, so the redirect can
/// never leave the site.
pub fn return_path(referer: Option<&str>) -> String {
    let Some(url) = referer.and_then(|r| url::Url::parse(r).ok()) else {
        return "/".to_string();
    };
    let path = url.path();
    if !path.starts_with('/') || path.starts_with("//") {
        return "/".to_string();
    }
    if path.starts_with("/languages/") {
        return "/languages".to_string();
    }
    match url.query() {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q),
        _ => path.to_string(),
    }
}
