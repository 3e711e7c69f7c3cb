// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use procura_domain::{EmployeeId, OrganizationId, OrganizationType};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::config::ServerConfig;
use crate::handlers::HttpError;

struct TestApp {
    router: Router,
    org: OrganizationId,
    bob: EmployeeId,
}

/// Builds a router over a seeded in-memory database.
///
/// `alice` is responsible for `org`, `bob` for a second organization.
fn create_test_app() -> TestApp {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let org: OrganizationId = persistence
        .create_organization("Roads Ltd", None, OrganizationType::Llc)
        .unwrap();
    let other_org: OrganizationId = persistence
        .create_organization("Bridges JSC", None, OrganizationType::Jsc)
        .unwrap();
    let alice: EmployeeId = persistence.create_employee("alice", None, None).unwrap();
    let bob: EmployeeId = persistence.create_employee("bob", None, None).unwrap();
    persistence.add_responsible(org, alice).unwrap();
    persistence.add_responsible(other_org, bob).unwrap();

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };
    TestApp {
        router: build_router(app_state),
        org,
        bob,
    }
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (HttpStatusCode, Value) {
    let request: Request<Body> = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status: HttpStatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_tender(app: &TestApp, name: &str) -> String {
    let (status, body) = send(
        &app.router,
        "POST",
        "/api/tenders/new",
        Some(json!({
            "name": name,
            "description": "Original scope",
            "serviceType": "Construction",
            "organizationId": app.org.to_string(),
            "creatorUsername": "alice",
        })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

async fn create_bid(app: &TestApp, tender_id: &str) -> String {
    let (status, body) = send(
        &app.router,
        "POST",
        "/api/bids/new",
        Some(json!({
            "name": "Offer",
            "description": "Original offer",
            "tenderId": tender_id,
            "authorType": "User",
            "authorId": app.bob.to_string(),
        })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_ping_returns_ok() {
    let app: TestApp = create_test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/api/ping")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatusCode::OK);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body_bytes[..], b"ok");
}

#[tokio::test]
async fn test_tender_walkthrough_over_http() {
    let app: TestApp = create_test_app();
    let id: String = create_tender(&app, "Road repair").await;

    let (status, body) = send(
        &app.router,
        "PUT",
        &format!("/api/tenders/{id}/status?username=alice&status=Published"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "Published");
    assert_eq!(body["version"], 1);

    let (status, body) = send(
        &app.router,
        "PATCH",
        &format!("/api/tenders/{id}/edit?username=alice"),
        Some(json!({ "description": "Updated scope" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["version"], 2);
    assert_eq!(body["name"], "Road repair");

    let (status, body) = send(
        &app.router,
        "PUT",
        &format!("/api/tenders/{id}/rollback/1?username=alice"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["version"], 3);
    assert_eq!(body["description"], "Original scope");
    assert_eq!(body["status"], "Published");

    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/tenders/{id}/status?username=alice"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body, json!("Published"));

    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/tenders/{id}/versions?username=alice"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_error_statuses_and_reason_body() {
    let app: TestApp = create_test_app();
    let id: String = create_tender(&app, "Road repair").await;

    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/tenders/{id}/status?username=mallory"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert!(body["reason"].as_str().unwrap().contains("mallory"));

    let (status, _) = send(
        &app.router,
        "GET",
        &format!("/api/tenders/{id}/status?username=bob"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);

    let (status, _) = send(
        &app.router,
        "GET",
        &format!("/api/tenders/{id}/status"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app.router,
        "PUT",
        &format!("/api/tenders/{id}/rollback/9?username=alice"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);

    let (status, _) = send(
        &app.router,
        "PUT",
        &format!("/api/tenders/{id}/rollback/zero?username=alice"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app: TestApp = create_test_app();

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/tenders/new",
        Some(json!({ "name": "Road repair" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(body["reason"].is_string());
}

#[tokio::test]
async fn test_malformed_query_and_path_have_reason_body() {
    let app: TestApp = create_test_app();

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/tenders/my?username=alice&limit=1&limit=2",
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(body["reason"].as_str().unwrap().starts_with("Invalid query string"));

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/tenders/%FF%FE/status?username=alice",
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(body["reason"].as_str().unwrap().starts_with("Invalid path"));
}

#[tokio::test]
async fn test_published_listing_accepts_repeated_service_type() {
    let app: TestApp = create_test_app();
    let id: String = create_tender(&app, "Road repair").await;
    send(
        &app.router,
        "PUT",
        &format!("/api/tenders/{id}/status?username=alice&status=Published"),
        None,
    )
    .await;

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/tenders?service_type=Delivery&service_type=Construction",
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app.router, "GET", "/api/tenders?service_type=Delivery", None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = send(&app.router, "GET", "/api/tenders?service_type=Catering", None).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);

    let (status, _) = send(&app.router, "GET", "/api/tenders?limit=-1", None).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bid_edit_accepts_post_and_patch() {
    let app: TestApp = create_test_app();
    let tender_id: String = create_tender(&app, "Road repair").await;
    let bid_id: String = create_bid(&app, &tender_id).await;

    let (status, body) = send(
        &app.router,
        "POST",
        &format!("/api/bids/{bid_id}/edit?username=bob"),
        Some(json!({ "name": "Better offer" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["version"], 2);

    let (status, body) = send(
        &app.router,
        "PATCH",
        &format!("/api/bids/{bid_id}/edit?username=bob"),
        Some(json!({ "description": "Revised offer" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["version"], 3);
    assert_eq!(body["name"], "Better offer");
    assert_eq!(body["authorType"], "User");
}

#[tokio::test]
async fn test_submit_decision_approval_closes_tender() {
    let app: TestApp = create_test_app();
    let tender_id: String = create_tender(&app, "Road repair").await;
    let bid_id: String = create_bid(&app, &tender_id).await;

    let (status, _) = send(
        &app.router,
        "PUT",
        &format!("/api/bids/{bid_id}/submit_decision?username=bob&decision=Approved"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);

    let (status, body) = send(
        &app.router,
        "PUT",
        &format!("/api/bids/{bid_id}/submit_decision?username=alice&decision=Approved"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "Created");

    let (_, body) = send(
        &app.router,
        "GET",
        &format!("/api/tenders/{tender_id}/status?username=alice"),
        None,
    )
    .await;
    assert_eq!(body, json!("Closed"));
}

#[test]
fn test_internal_api_error_maps_to_server_error() {
    let err: HttpError = HttpError::from(procura_api::ApiError::Internal {
        message: String::from("Storage failure"),
    });

    assert_eq!(err.status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, "Internal error: Storage failure");
}

#[test]
fn test_config_from_args_uses_defaults() {
    let args: Args = Args::try_parse_from(["procura-server"]).unwrap();
    let config: ServerConfig = ServerConfig::from(args);

    assert_eq!(config.address.to_string(), "0.0.0.0:8080");
    assert!(config.database.is_none());
    assert_eq!(config.log_level, "info");
}
