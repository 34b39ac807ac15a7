//! Readiness and metrics endpoints

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use observability::metrics_handler;

use crate::state::AppState;

/// Create the operational router (`/ready`, `/metrics`)
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Readiness check - pings MongoDB when it backs the store
async fn readiness_check(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture)> = match &state.db {
        Some(db) => vec![(
            "mongodb",
            Box::pin(async move {
                let status = database::mongodb::check_health_detailed(db).await;
                if status.healthy {
                    Ok(())
                } else {
                    Err(status.message.unwrap_or_else(|| "ping failed".to_string()))
                }
            }),
        )],
        None => vec![("memory", Box::pin(async { Ok(()) }))],
    };

    match run_health_checks(checks).await {
        Ok(ok) => ok.into_response(),
        Err(unavailable) => unavailable.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::memory_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_ready_with_memory_store() {
        let response = router(memory_state())
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["memory"], "connected");
    }

    #[tokio::test]
    async fn test_metrics_route_renders_text() {
        let response = router(memory_state())
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
