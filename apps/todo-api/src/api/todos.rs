//! Todo API routes
//!
//! Wires the configured service into the domain's transport.

use axum::Router;
use domain_todos::{Endpoints, TransportOptions, handlers};

use crate::state::AppState;

/// Create todos router
pub fn router(state: &AppState) -> Router {
    let endpoints = Endpoints::new(state.service.clone());
    let options = TransportOptions {
        request_timeout: state.config.server.request_timeout,
    };

    handlers::router(endpoints, options)
}
