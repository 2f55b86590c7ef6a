//! HTTP API tests driven through the full middleware stack

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use plinko::{api::build_app, GameConfig, GameProcessor, ServerConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(seed: u64) -> Router {
    let game = GameConfig {
        rng_seed: Some(seed),
        ..GameConfig::default()
    };
    let processor = Arc::new(GameProcessor::from_config(&game).expect("default config is valid"));
    build_app(&ServerConfig::default(), processor).expect("metrics registry")
}

fn play_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/play")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_play_returns_seeded_outcome() {
    let response = app(42)
        .oneshot(play_request(json!({"rows": 16, "difficultyLevel": 1, "bet": 100})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "win": 50.0,
            "path": [0, 1, 1, 1, 1, 1, 2, 3, 3, 4, 5, 5, 5, 6, 7, 7, 7],
            "finalLocation": 7,
            "multiplier": 0.5
        })
    );
}

#[tokio::test]
async fn test_validation_messages() {
    let cases = [
        (json!({"difficultyLevel": 1, "bet": 100}), "Invalid rows. Value must be between 8 and 16."),
        (json!({"rows": 17, "difficultyLevel": 1, "bet": 100}), "Invalid rows. Value must be between 8 and 16."),
        (json!({"rows": 8, "difficultyLevel": 3, "bet": 100}), "Invalid difficulty. Value must be between 0 and 2."),
        (json!({"rows": 8, "bet": 100}), "Invalid difficulty. Value must be between 0 and 2."),
        (json!({"rows": 8, "difficultyLevel": 0, "bet": 0}), "Invalid bet. Value must be between 0.1 and 1000."),
        (json!({"rows": 8, "difficultyLevel": 0, "bet": 1000.5}), "Invalid bet. Value must be between 0.1 and 1000."),
        (json!({"rows": 99, "difficultyLevel": 99, "bet": -1}), "Invalid rows. Value must be between 8 and 16."),
    ];

    let app = app(1);
    for (payload, message) in cases {
        let response = app.clone().oneshot(play_request(payload.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {}", payload);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert_eq!(body["error"]["message"], message, "payload {}", payload);
        assert!(body["request_id"].is_string());
    }
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/play")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app(1).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .method("POST")
        .uri("/play")
        .header("content-type", "application/json")
        .header("x-request-id", "client-abc")
        .body(Body::from(json!({"rows": 5}).to_string()))
        .unwrap();

    let response = app(1).oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "client-abc");
    assert_eq!(json_body(response).await["request_id"], "client-abc");
}

#[tokio::test]
async fn test_health() {
    let response = app(1)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "Running"}));
}

#[tokio::test]
async fn test_config_lists_limits_and_tiers() {
    let response = app(1)
        .oneshot(Request::builder().uri("/config").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["limits"]["minRows"], 8);
    assert_eq!(body["limits"]["maxRows"], 16);
    assert_eq!(body["limits"]["maxBet"], 1000.0);
    assert_eq!(body["difficulties"], json!(["low", "medium", "high"]));
}

#[tokio::test]
async fn test_metrics_count_plays_and_rejections() {
    let app = app(3);

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(play_request(json!({"rows": 10, "difficultyLevel": 2, "bet": 1})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = app
        .clone()
        .oneshot(play_request(json!({"rows": 10, "difficultyLevel": 2})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let text = text_body(response).await;
    assert!(text.contains("plinko_plays_total{difficulty=\"2\"} 3"));
    assert!(text.contains("plinko_rejected_requests_total 1"));
    assert!(text.contains("plinko_wagered_total 3"));
}

#[tokio::test]
async fn test_unknown_route_has_error_body() {
    let request = Request::builder()
        .uri("/nope")
        .header("x-request-id", "lost-1")
        .body(Body::empty())
        .unwrap();
    let response = app(1).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["request_id"], "lost-1");
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_wrong_method_has_error_body() {
    let response = app(1)
        .oneshot(Request::builder().uri("/play").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.headers().contains_key("x-request-id"));
    assert!(response.headers().contains_key("allow"));

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "METHOD_NOT_ALLOWED");
    assert!(body["request_id"].is_string());
}
