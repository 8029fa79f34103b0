//! Problem CRUD endpoint tests over the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use grindlog_api::auth::StaticAuthProvider;
use grindlog_api::{build_router, AppState};
use grindlog_core::AuthUser;
use grindlog_judges::ProblemImporter;
use grindlog_store::Store;

const TOKEN: &str = "test-token";

fn test_router() -> Router {
    let auth = StaticAuthProvider::new(
        TOKEN.to_string(),
        AuthUser {
            id: "tester".to_string(),
            email: "tester@example.com".to_string(),
            name: None,
        },
    );
    build_router(AppState::new(
        Store::memory(),
        Arc::new(auth),
        ProblemImporter::new(),
    ))
}

fn request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn create_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "platform": "codeforces",
        "url": "https://codeforces.com/contest/1/A"
    })
}

#[tokio::test]
async fn test_requests_without_token_are_unauthorized() {
    let router = test_router();
    let req = Request::builder()
        .method("GET")
        .uri("/problems")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&router, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_requests_with_wrong_token_are_unauthorized() {
    let router = test_router();
    let req = Request::builder()
        .method("GET")
        .uri("/problems")
        .header(header::AUTHORIZATION, "Bearer wrong")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&router, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_and_list_problem() {
    let router = test_router();

    let (status, json) = send(
        &router,
        request("POST", "/problems", Some(create_body("Theatre Square"))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["title"], "Theatre Square");
    assert_eq!(json["data"]["status"], "attempted");

    let (status, json) = send(&router, request("GET", "/problems", None)).await;
    assert_eq!(status, StatusCode::OK);
    let problems = json["data"].as_array().unwrap();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0]["title"], "Theatre Square");
}

#[tokio::test]
async fn test_create_missing_required_field_is_400() {
    let router = test_router();
    let body = serde_json::json!({"platform": "codeforces", "url": "https://codeforces.com/contest/1/A"});
    let (status, json) = send(&router, request("POST", "/problems", Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn test_update_merges_fields() {
    let router = test_router();
    let (_, created) = send(
        &router,
        request("POST", "/problems", Some(create_body("A"))),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let update = serde_json::json!({"status": "solved", "tags": ["Math", "math"]});
    let (status, json) = send(
        &router,
        request("PUT", &format!("/problems/{}", id), Some(update)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "solved");
    assert_eq!(json["data"]["tags"], serde_json::json!(["math"]));
    // Untouched field survives the merge
    assert_eq!(json["data"]["title"], "A");
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let router = test_router();
    let update = serde_json::json!({"status": "solved"});
    let (status, json) = send(
        &router,
        request(
            "PUT",
            "/problems/00000000-0000-0000-0000-000000000000",
            Some(update),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_delete_then_404() {
    let router = test_router();
    let (_, created) = send(
        &router,
        request("POST", "/problems", Some(create_body("A"))),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, json) = send(
        &router,
        request("DELETE", &format!("/problems/{}", id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["message"], "Problem deleted");

    let (status, _) = send(
        &router,
        request("DELETE", &format!("/problems/{}", id), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&router, request("GET", "/problems", None)).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
