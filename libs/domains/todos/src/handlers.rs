//! HTTP transport for the endpoint layer.
//!
//! | Method | Path               | Body                          |
//! |--------|--------------------|-------------------------------|
//! | GET    | `/`                |                               |
//! | POST   | `/add`             | `{"todo": {"title", "complete"}}` |
//! | PUT    | `/set-complete`    | `{"id"}`                      |
//! | PUT    | `/remove-complete` | `{"id"}`                      |
//! | DELETE | `/delete/{id}`     |                               |
//!
//! Successful calls answer `200` with the response fields plus
//! `"error": null`; failures answer `{"error": message}`.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{MethodRouter, delete, get, post, put},
};
use axum_helpers::errors::handlers::method_not_allowed;
use axum_helpers::{AppError, IdPath, JsonBody, error_response, route_cors};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::context::RequestContext;
use crate::endpoints::{
    AddRequest, DeleteRequest, EndpointResult, Endpoints, GetRequest, Outcome,
    RemoveCompleteRequest, SetCompleteRequest,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request settings applied by the transport.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Deadline given to each request; `None` lets calls run unbounded
    pub request_timeout: Option<Duration>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

struct TransportState {
    endpoints: Endpoints,
    options: TransportOptions,
}

/// Create the todo router. Every route carries its own CORS policy.
pub fn router(endpoints: Endpoints, options: TransportOptions) -> Router {
    let state = Arc::new(TransportState { endpoints, options });

    Router::new()
        .route("/", with_cors(get(get_todos), Method::GET))
        .route("/add", with_cors(post(add_todo), Method::POST))
        .route("/set-complete", with_cors(put(set_complete), Method::PUT))
        .route("/remove-complete", with_cors(put(remove_complete), Method::PUT))
        .route("/delete/{id}", with_cors(delete(delete_todo), Method::DELETE))
        // Bare prefixes reach IdPath so a missing id is a 400, not a 404
        .route("/delete", with_cors(delete(delete_todo), Method::DELETE))
        .route("/delete/", with_cors(delete(delete_todo), Method::DELETE))
        .with_state(state)
}

/// The 405 fallback goes in before the CORS layer so wrong-method answers
/// and preflights both carry CORS headers.
fn with_cors(
    route: MethodRouter<Arc<TransportState>>,
    method: Method,
) -> MethodRouter<Arc<TransportState>> {
    route.fallback(method_not_allowed).layer(route_cors(method))
}

fn request_context(headers: &HeaderMap, options: &TransportOptions) -> RequestContext {
    let ctx = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())
        .map(RequestContext::new)
        .unwrap_or_else(RequestContext::background);

    match options.request_timeout {
        Some(timeout) => ctx.with_timeout(timeout),
        None => ctx,
    }
}

#[derive(Serialize)]
struct SuccessBody<T> {
    #[serde(flatten)]
    payload: T,
    error: Option<String>,
}

fn encode<T: Serialize>(result: EndpointResult<T>) -> Response {
    match result {
        Ok(Outcome::Success(payload)) => (
            StatusCode::OK,
            Json(SuccessBody {
                payload,
                error: None,
            }),
        )
            .into_response(),
        Ok(Outcome::Failure(err)) => AppError::from(err).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Endpoint invocation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

async fn get_todos(State(state): State<Arc<TransportState>>, headers: HeaderMap) -> Response {
    let ctx = request_context(&headers, &state.options);
    encode((state.endpoints.get)(ctx, GetRequest {}).await)
}

async fn add_todo(
    State(state): State<Arc<TransportState>>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<AddRequest>,
) -> Response {
    let ctx = request_context(&headers, &state.options);
    encode((state.endpoints.add)(ctx, request).await)
}

async fn set_complete(
    State(state): State<Arc<TransportState>>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<SetCompleteRequest>,
) -> Response {
    let ctx = request_context(&headers, &state.options);
    encode((state.endpoints.set_complete)(ctx, request).await)
}

async fn remove_complete(
    State(state): State<Arc<TransportState>>,
    headers: HeaderMap,
    JsonBody(request): JsonBody<RemoveCompleteRequest>,
) -> Response {
    let ctx = request_context(&headers, &state.options);
    encode((state.endpoints.remove_complete)(ctx, request).await)
}

async fn delete_todo(
    State(state): State<Arc<TransportState>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> Response {
    let ctx = request_context(&headers, &state.options);
    encode((state.endpoints.delete)(ctx, DeleteRequest { id }).await)
}
