//! Response construction.
//!
//! # Responsibilities
//! - Serve the shell page with the resolved route's bindings as headers
//! - Build redirects to the fallback or a hashbang URL
//! - Reject methods that cannot navigate
//!
//! # Design Decisions
//! - The shell is never cached: a new deploy must reach clients immediately
//! - Route headers let the client bootstrap the right view without a second lookup

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::site::Shell;
use crate::routing::RouteEntry;

/// Name of the resolved route.
pub const X_ROUTE: HeaderName = HeaderName::from_static("x-route");
/// URL of the view template for the resolved route.
pub const X_VIEW_TEMPLATE: HeaderName = HeaderName::from_static("x-view-template");
/// Controller identifier for the resolved route.
pub const X_VIEW_CONTROLLER: HeaderName = HeaderName::from_static("x-view-controller");

/// 200 with the shell page for `entry`.
pub fn shell_page(shell: &Shell, entry: &RouteEntry) -> Response {
    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/html; charset=utf-8"),
            ),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-cache")),
            (X_ROUTE, HeaderValue::from_static(entry.route().name())),
            (X_VIEW_TEMPLATE, HeaderValue::from_static(entry.view().url())),
            (
                X_VIEW_CONTROLLER,
                HeaderValue::from_static(entry.controller().identifier()),
            ),
        ],
        Body::from(shell.html()),
    )
        .into_response()
}

/// Redirect to `location` with the given 3xx status.
pub fn redirect(status: StatusCode, location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (status, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::error!(location = %location, "Redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// 405 for anything but GET and HEAD.
pub fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, HeaderValue::from_static("GET, HEAD"))],
    )
        .into_response()
}
