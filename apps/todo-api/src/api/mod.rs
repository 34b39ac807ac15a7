//! API routes module
//!
//! The todo routes are mounted at the root; operational routes sit beside them.

pub mod health;
pub mod todos;

use axum::Router;
use axum_helpers::server::{health_router, with_common_layers};

use crate::state::AppState;

/// Assemble the served application: API routes, liveness, fallbacks and
/// HTTP metrics.
pub fn app(state: &AppState) -> Router {
    with_common_layers(routes(state).merge(health_router(state.config.app)))
        .layer(axum::middleware::from_fn(observability::metrics_middleware))
}

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(todos::router(state))
        .merge(health::router(state.clone()))
}
