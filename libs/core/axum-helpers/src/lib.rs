//! # Axum Helpers
//!
//! Shared building blocks for the workspace's Axum services.
//!
//! ## Modules
//!
//! - **[`server`]**: common layers, health checks, graceful shutdown
//! - **[`http`]**: per-route CORS
//! - **[`errors`]**: the `{"error": message}` envelope and [`AppError`]
//! - **[`extractors`]**: path id and JSON body extractors that reject with [`AppError`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, health_router, with_common_layers};
//! use core_config::{app_info, server::ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = with_common_layers(api_routes().merge(health_router(app_info!())));
//!     let timeout = Duration::from_secs(30);
//!     create_production_app(router, &ServerConfig::default(), timeout, async {}).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, health_router,
    run_health_checks, serve_with_shutdown, with_common_layers,
};

pub use http::route_cors;

pub use errors::{AppError, ErrorCode, ErrorResponse, error_response};

pub use extractors::{IdPath, JsonBody};
