//! Handler tests for the todos domain
//!
//! These drive the router with `oneshot` against the in-memory store:
//! - Request decoding (JSON and path id)
//! - Response envelopes and status codes
//! - Per-route CORS
//!
//! The service and router are wired exactly as in production: decorators,
//! common layers and HTTP metrics included.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::with_common_layers;
use domain_todos::middleware::{logging_middleware, metrics_middleware};
use domain_todos::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let service = service::new(
        InMemoryTodoRepository::new(),
        vec![logging_middleware(), metrics_middleware()],
    );
    with_common_layers(handlers::router(
        Endpoints::new(service),
        TransportOptions::default(),
    ))
    .layer(axum::middleware::from_fn(observability::metrics_middleware))
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

fn find<'a>(listing: &'a Value, id: &str) -> Option<&'a Value> {
    listing["t"].as_array()?.iter().find(|t| t["id"] == id)
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let app = app();

    let (status, added) = send(
        &app,
        "POST",
        "/add",
        Some(json!({"todo": {"title": "buy milk", "complete": false}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["error"], Value::Null);
    assert_eq!(added["t"]["title"], "buy milk");
    assert_eq!(added["t"]["complete"], false);
    let id = added["t"]["id"].as_str().unwrap().to_string();
    test_utils::assertions::assert_object_id(&id, "generated id");

    let (status, listing) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["error"], Value::Null);
    assert!(find(&listing, &id).is_some());

    let (status, body) = send(&app, "PUT", "/set-complete", Some(json!({"id": id}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": null}));

    let (_, listing) = send(&app, "GET", "/", None).await;
    assert_eq!(find(&listing, &id).unwrap()["complete"], true);

    let (status, body) = send(&app, "DELETE", &format!("/delete/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": null}));

    let (_, listing) = send(&app, "GET", "/", None).await;
    assert!(find(&listing, &id).is_none());

    let (status, body) = send(&app, "DELETE", "/delete/not-a-real-id", None).await;
    assert_ne!(status, StatusCode::OK);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_empty_store_returns_empty_list() {
    let (status, body) = send(&app(), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"t": [], "error": null}));
}

#[tokio::test]
async fn test_add_ignores_client_id_and_defaults_complete() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/add",
        Some(json!({"todo": {"id": "mine", "title": "no flag"}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["t"]["id"], "mine");
    assert_eq!(body["t"]["complete"], false);
}

#[tokio::test]
async fn test_set_complete_is_idempotent_and_reversible() {
    let app = app();
    let (_, added) = send(&app, "POST", "/add", Some(json!({"todo": {"title": "twice"}}))).await;
    let id = added["t"]["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let (status, _) = send(&app, "PUT", "/set-complete", Some(json!({"id": id}))).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, listing) = send(&app, "GET", "/", None).await;
    assert_eq!(find(&listing, &id).unwrap()["complete"], true);

    let (status, _) = send(&app, "PUT", "/remove-complete", Some(json!({"id": id}))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, listing) = send(&app, "GET", "/", None).await;
    assert_eq!(find(&listing, &id).unwrap()["complete"], false);
}

#[tokio::test]
async fn test_repeated_delete_is_not_found() {
    let app = app();
    let (_, added) = send(&app, "POST", "/add", Some(json!({"todo": {"title": "once"}}))).await;
    let id = added["t"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/delete/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", &format!("/delete/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("todo not found: {id}"));
}

#[tokio::test]
async fn test_set_complete_unknown_id_is_not_found() {
    let (status, body) = send(
        &app(),
        "PUT",
        "/set-complete",
        Some(json!({"id": "65f0c0ffee0000000000beef"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_rejected_before_the_service() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/add")
        .header("content-type", "application/json")
        .body(Body::from("{\"todo\": {\"title\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response.into_body()).await["error"].is_string());

    // Nothing was persisted
    let (_, listing) = send(&app, "GET", "/", None).await;
    assert_eq!(listing["t"], json!([]));
}

#[tokio::test]
async fn test_set_complete_without_id_field_is_bad_request() {
    let (status, _) = send(&app(), "PUT", "/set-complete", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_without_id_is_bad_request() {
    let app = app();
    for uri in ["/delete", "/delete/"] {
        let (status, body) = send(&app, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "missing id");
    }
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let response = app()
        .oneshot(
            Request::get("/add")
                .header(header::ORIGIN, "http://frontend.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "the HTTP method is not allowed for this resource");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, body) = send(&app(), "POST", "/archive", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "the requested resource was not found");
}

#[tokio::test]
async fn test_cors_preflight_allows_only_the_route_method() {
    let app = app();
    let routes = [
        ("/", "GET"),
        ("/add", "POST"),
        ("/set-complete", "PUT"),
        ("/remove-complete", "PUT"),
        ("/delete/65f0c0ffee0000000000beef", "DELETE"),
    ];

    for (uri, method) in routes {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri(uri)
                    .header(header::ORIGIN, "http://frontend.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, method)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "preflight for {uri}");
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*", "origin for {uri}");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], method, "methods for {uri}");
    }
}

#[tokio::test]
async fn test_cors_headers_on_simple_request() {
    let response = app()
        .oneshot(
            Request::get("/")
                .header(header::ORIGIN, "http://frontend.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_request_id_header_is_accepted() {
    let builder = TestDataBuilder::from_test_name("request_id_header");

    let response = app()
        .oneshot(
            Request::get("/")
                .header(handlers::REQUEST_ID_HEADER, builder.request_id())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
