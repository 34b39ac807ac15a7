use axum::{http::StatusCode, response::Response};

use super::error_response;

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "the requested resource was not found")
}

/// Fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "the HTTP method is not allowed for this resource",
    )
}
