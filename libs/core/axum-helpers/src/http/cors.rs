use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

/// CORS layer for a single route.
///
/// Any origin may call the route, but preflight responses only advertise
/// `method` and the `Content-Type`/`Content-Length` request headers. Attach it
/// with `MethodRouter::layer` so each route carries its own policy.
pub fn route_cors(method: Method) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([method])
        .allow_headers([header::CONTENT_TYPE, header::CONTENT_LENGTH])
}
