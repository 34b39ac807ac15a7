use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use axum::Router;
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

/// Add the cross-cutting layers every service router gets: access logging
/// through `TraceLayer` and the JSON 404/405 fallbacks.
///
/// CORS is not applied here; routes carry their own
/// [`route_cors`](crate::http::route_cors) layers. The 405 fallback only
/// fills routes without one, so a CORS route must set its fallback before
/// layering.
pub fn with_common_layers(router: Router) -> Router {
    router
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Bind the configured address and serve until SIGINT/SIGTERM, then run
/// `cleanup` under `shutdown_timeout`.
///
/// # Errors
/// Returns an error if the listener fails to bind or the server fails while
/// running.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(server_config.address()).await?;
    let coordinator = ShutdownCoordinator::new();

    let signals = coordinator.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    serve_with_shutdown(listener, router, coordinator, shutdown_timeout, cleanup).await
}

/// Serve on an already bound listener until `coordinator` fires.
///
/// In-flight requests drain through axum's graceful shutdown while `cleanup`
/// runs concurrently; cleanup is abandoned once `shutdown_timeout` elapses.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_signal = coordinator.clone();
    let cleanup_handle = tokio::spawn(async move {
        cleanup_signal.wait().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed successfully"),
            Err(_) => tracing::warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_handle.await.ok();

    serve_result
}
