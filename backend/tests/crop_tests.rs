//! Crop recommendation integration tests
//!
//! Tests for the crop recommendation endpoint including:
//! - Required field validation before any outbound call
//! - Weather lookup feeding the model prompt
//! - Failure ordering between the weather and model calls

mod common;

use axum::http::StatusCode;
use common::{current_weather, post_json, FakeLlm, FakeWeather, Harness};
use krishimitra_backend::services::crop::SYSTEM_PROMPT;
use serde_json::json;

fn request(body: serde_json::Value) -> String {
    body.to_string()
}

#[tokio::test]
async fn test_recommendation_uses_soil_and_weather() {
    let harness = Harness::new().with_weather(FakeWeather::returning(current_weather(
        "Cuttack", 31.0, 70, 3.0, "Clouds",
    )));

    let (status, body) = post_json(
        harness.app(),
        "/api/recommend-crop",
        request(json!({
            "ph": 6.5, "nitrogen": 280, "phosphorus": "25", "potassium": 210, "city": "Cuttack"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendation"], "1. Rice\n2. Maize\n3. Green gram");
    assert_eq!(*harness.weather.cities.lock().unwrap(), vec!["Cuttack"]);

    let messages = harness.llm.messages.lock().unwrap().clone();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, "system");
    assert_eq!(messages[0].content, SYSTEM_PROMPT);
    assert_eq!(messages[1].role, "user");
    assert!(messages[1].content.contains("pH=6.5, N=280, P=25, K=210"));
    assert!(messages[1].content.contains("Temp=31°C, Humidity=70%"));
    assert!(messages[1].content.contains("clouds today"));
}

#[tokio::test]
async fn test_reply_language_is_requested() {
    let harness = Harness::new();

    let (status, _) = post_json(
        harness.app(),
        "/api/recommend-crop",
        request(json!({
            "ph": 7, "nitrogen": 0, "phosphorus": 0, "potassium": 0,
            "city": "Karnal", "language": "hi"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let messages = harness.llm.messages.lock().unwrap().clone();
    assert!(messages[1].content.ends_with("Reply in Hindi."));
}

#[tokio::test]
async fn test_missing_fields_make_no_outbound_calls() {
    let harness = Harness::new();

    let (status, body) = post_json(
        harness.app(),
        "/api/recommend-crop",
        request(json!({ "ph": 6.5, "nitrogen": "", "city": "Cuttack" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing required fields: nitrogen, phosphorus, potassium"
    );
    assert_eq!(harness.weather.calls(), 0);
    assert_eq!(harness.llm.calls(), 0);
}

#[tokio::test]
async fn test_invalid_values_are_rejected() {
    let harness = Harness::new();

    for (body, message) in [
        (
            json!({ "ph": "acidic", "nitrogen": 1, "phosphorus": 1, "potassium": 1, "city": "Puri" }),
            "ph must be a number",
        ),
        (
            json!({ "ph": 15, "nitrogen": 1, "phosphorus": 1, "potassium": 1, "city": "Puri" }),
            "pH must be between 0 and 14",
        ),
    ] {
        let (status, response) =
            post_json(harness.app(), "/api/recommend-crop", request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], message);
    }
    assert_eq!(harness.weather.calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let harness = Harness::new();

    let (status, body) =
        post_json(harness.app(), "/api/recommend-crop", "{\"ph\": 6.5,".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(harness.llm.calls(), 0);
}

#[tokio::test]
async fn test_weather_failure_skips_model() {
    let harness = Harness::new().with_weather(FakeWeather::failing());

    let (status, body) = post_json(
        harness.app(),
        "/api/recommend-crop",
        request(json!({
            "ph": 6.5, "nitrogen": 280, "phosphorus": 25, "potassium": 210, "city": "Atlantis"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert_eq!(harness.weather.calls(), 1);
    assert_eq!(harness.llm.calls(), 0);
}

#[tokio::test]
async fn test_missing_model_key_fails_before_weather_call() {
    let harness = Harness::new().with_llm(FakeLlm {
        unconfigured: true,
        ..Default::default()
    });

    let (status, body) = post_json(
        harness.app(),
        "/api/recommend-crop",
        request(json!({
            "ph": 6.5, "nitrogen": 280, "phosphorus": 25, "potassium": 210, "city": "Cuttack"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "CONFIGURATION_ERROR");
    assert_eq!(harness.weather.calls(), 0);
    assert_eq!(harness.llm.calls(), 0);
}

#[tokio::test]
async fn test_model_failure_is_upstream_error() {
    let harness = Harness::new().with_llm(FakeLlm::failing());

    let (status, body) = post_json(
        harness.app(),
        "/api/recommend-crop",
        request(json!({
            "ph": 6.5, "nitrogen": 280, "phosphorus": 25, "potassium": 210, "city": "Cuttack"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Completion API request failed", "code": "UPSTREAM_ERROR" })
    );
    assert_eq!(harness.weather.calls(), 1);
    assert_eq!(harness.llm.calls(), 1);
}
