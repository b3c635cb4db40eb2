use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use dsl_sentence::server::{SharedResolver, router};
use dsl_sentence::settings::Settings;
use serde_json::{Value, json};
use tower::ServiceExt;

fn resolver() -> SharedResolver {
    let settings = Settings::from_toml(
        r#"
        [[enumerations]]
        fact_type = "Bar"
        field = "baz"
        values = ["1=One", "2=Two"]
        "#,
    )
    .unwrap();
    Arc::new(settings.resolver())
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router(resolver()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn render_returns_rows_and_values() {
    let (status, body) = post("/v1/render", json!({ "definition": "{x:FOO:Bar.baz} items", "values": ["2"] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["values"], json!(["2"]));
    assert_eq!(body["rows"][0][1]["kind"], "dropdown");
    assert_eq!(body["rows"][0][1]["selected"], 1);
}

#[tokio::test]
async fn malformed_definition_is_bad_request() {
    let (status, body) = post("/v1/render", json!({ "definition": "Age is {age", "values": ["1"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["error"].as_str().unwrap().contains("Parse error"));
}

#[tokio::test]
async fn edit_rejects_invalid_text() {
    let (status, body) = post(
        "/v1/edit",
        json!({ "definition": "Count {n:[0-9]+}", "values": ["5"], "slot": 0, "edit": { "kind": "text", "value": "abc" } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], false);
    assert_eq!(body["dirty"], false);
    assert_eq!(body["values"], json!(["5"]));
    assert_eq!(body["message"], "The value abc is not valid for this field");
}

#[tokio::test]
async fn edit_toggles_boolean() {
    let (status, body) = post(
        "/v1/edit",
        json!({ "definition": "{b:BOOLEAN:true}", "values": ["true"], "slot": 0, "edit": { "kind": "checked", "value": false } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], true);
    assert_eq!(body["dirty"], true);
    assert_eq!(body["values"], json!(["false"]));
}

#[tokio::test]
async fn edit_of_missing_slot_is_bad_request() {
    let (status, body) = post(
        "/v1/edit",
        json!({ "definition": "{a}", "values": ["x"], "slot": 3, "edit": { "kind": "text", "value": "y" } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("slot 3"));
}
