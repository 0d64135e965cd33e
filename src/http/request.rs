//! Request inspection and request IDs.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Extract the parts of a request the pipeline reads
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Extraction borrows from the request; nothing is copied

use axum::http::{header, HeaderMap, HeaderValue, Method, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::locale::negotiate::cookie_value;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Issues a fresh UUID v4 request ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

/// The request ID header, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Borrowed view of everything the pipeline needs from a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestParts<'a> {
    /// GET or HEAD. Other methods never match a page.
    pub readable: bool,
    pub path: &'a str,
    pub query: Option<&'a str>,
    /// Value of the locale cookie.
    pub locale_cookie: Option<&'a str>,
    pub accept_language: Option<&'a str>,
    pub referer: Option<&'a str>,
    pub request_id: &'a str,
}

impl<'a> RequestParts<'a> {
    pub fn from_request<B>(request: &'a Request<B>, cookie_name: &str) -> Self {
        let headers = request.headers();
        let header_str =
            move |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok());

        // HTTP/2 clients may split cookies across several headers.
        let locale_cookie = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|h| cookie_value(h, cookie_name));

        Self {
            readable: matches!(*request.method(), Method::GET | Method::HEAD),
            path: request.uri().path(),
            query: request.uri().query(),
            locale_cookie,
            accept_language: header_str(header::ACCEPT_LANGUAGE),
            referer: header_str(header::REFERER),
            request_id: request_id(headers),
        }
    }
}
