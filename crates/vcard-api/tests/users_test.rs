use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use vcard_api::{AppStateInner, users};
use vcard_db::{RecordService, StoreBackend};

fn test_app() -> Router {
    let state = Arc::new(AppStateInner {
        service: RecordService::new(StoreBackend::memory()),
    });
    Router::new()
        .route("/user/{username}", get(users::get_user).post(users::post_user))
        .with_state(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_request(username: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/user/{username}"))
        .body(Body::empty())
        .unwrap()
}

fn post_request(username: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/user/{username}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn get_creates_a_seeded_default_record() {
    let app = test_app();

    let response = app.oneshot(get_request("alice")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record = body_json(response).await;
    assert_eq!(record["balance"].as_f64(), Some(0.0));
    assert_eq!(record["profile"]["firstName"], "BYBIT");
    assert_eq!(record["profile"]["lastName"], "VC User");
    assert_eq!(record["cardActive"], false);
    assert_eq!(record["card"]["last4"], "6040");
    assert_eq!(record["card"]["pan"], "4532 9901 2234 6040");

    let txs = record["txs"].as_array().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0]["type"], "reward");
    assert_eq!(txs[0]["amount"].as_f64(), Some(5.0));
    assert_eq!(txs[0]["ccy"], "USDT");
}

#[tokio::test]
async fn second_get_returns_the_same_record_without_reseeding() {
    let app = test_app();

    let first = body_json(app.clone().oneshot(get_request("alice")).await.unwrap()).await;
    let second = body_json(app.oneshot(get_request("alice")).await.unwrap()).await;

    assert_eq!(second, first);
    assert_eq!(second["txs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn post_then_get_round_trips_the_normalized_record() {
    let app = test_app();

    let payload = json!({"balance": 150, "profile": {"firstName": "Jane"}});
    let response = app
        .clone()
        .oneshot(post_request("jane123", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));

    let record = body_json(app.oneshot(get_request("jane123")).await.unwrap()).await;
    assert_eq!(record["balance"].as_f64(), Some(150.0));
    assert_eq!(record["profile"]["firstName"], "Jane");
    assert_eq!(record["profile"]["lastName"], "VC User");
    assert_eq!(record["card"]["last4"], "6084");
}

#[tokio::test]
async fn post_without_body_is_rejected() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/user/alice")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "missing body"}));
}

#[tokio::test]
async fn post_with_unparseable_body_is_rejected() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/user/alice")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "missing body"}));
}

#[tokio::test]
async fn post_with_scalar_body_is_rejected() {
    let app = test_app();

    let response = app.oneshot(post_request("alice", &json!(42))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "missing body"}));
}

#[tokio::test]
async fn post_drops_malformed_transactions() {
    let app = test_app();

    let payload = json!({
        "txs": [
            {"id": "t1", "type": "pay", "amount": 12.5, "ccy": "USDT",
             "ts": "2026-01-02T03:04:05.000Z", "status": "Completed",
             "merchant": "Coffee"},
            {"id": "x"},
            "not-an-object",
        ]
    });
    let response = app
        .clone()
        .oneshot(post_request("alice", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record = body_json(app.oneshot(get_request("alice")).await.unwrap()).await;
    let txs = record["txs"].as_array().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0]["id"], "t1");
    assert_eq!(txs[0]["merchant"], "Coffee");
}
