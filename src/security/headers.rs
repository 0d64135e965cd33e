//! Security response headers.
//!
//! # Responsibilities
//! - Add baseline hardening headers to every response
//! - Leave headers a handler already set untouched
//!
//! # Design Decisions
//! - Toggled by `security.enable_headers`; disabled means no layers at all
//! - Applied to static assets and rendered pages alike

use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

/// Header name/value pairs added when security headers are enabled.
pub const SECURITY_HEADERS: [(HeaderName, &str); 4] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
    (header::X_DNS_PREFETCH_CONTROL, "off"),
    (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
];

/// Wrap `router` with the security header layers when `enabled`.
pub fn apply_security_headers(router: Router, enabled: bool) -> Router {
    if !enabled {
        return router;
    }

    SECURITY_HEADERS
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                name,
                HeaderValue::from_static(value),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use tower::ServiceExt;

    fn app(enabled: bool) -> Router {
        let router = Router::new().route(
            "/",
            get(|| async { ([(header::X_FRAME_OPTIONS, "DENY")], "ok") }),
        );
        apply_security_headers(router, enabled)
    }

    #[tokio::test]
    async fn test_headers_added_when_enabled() {
        let response = app(true)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::X_DNS_PREFETCH_CONTROL], "off");
        assert!(headers.contains_key(header::REFERRER_POLICY));
    }

    #[tokio::test]
    async fn test_existing_header_kept() {
        let response = app(true)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    }

    #[tokio::test]
    async fn test_disabled_adds_nothing() {
        let response = app(false)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(!response.headers().contains_key(header::X_CONTENT_TYPE_OPTIONS));
    }
}
