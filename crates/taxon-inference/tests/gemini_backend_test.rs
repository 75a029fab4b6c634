//! Wire-level tests for the Gemini backend.
//!
//! Verifies the request shape (path, auth header, structured-output config)
//! and the response handling against a local mock server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taxon_core::{Error, GenerationBackend};
use taxon_inference::{classification_schema, GeminiBackend, GeminiConfig};

fn backend_for(server: &MockServer) -> GeminiBackend {
    GeminiBackend::new(GeminiConfig {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        model: "gemini-2.5-flash".to_string(),
        timeout_seconds: 10,
        temperature: 0.2,
    })
    .expect("Failed to create backend")
}

fn candidate_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }],
                "role": "model"
            },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn test_generate_sends_schema_and_api_key() {
    let mock_server = MockServer::start().await;

    let payload = r#"[{"code":"6403","description":"Leather footwear","category":"Goods","gstRate":18,"reason":"Leather shoes fall under heading 6403."}]"#;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "temperature": 0.2
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_response(payload)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let schema = classification_schema();
    let result = backend
        .generate_structured("classify leather shoes", &schema)
        .await;

    assert!(result.is_ok(), "Request should succeed: {:?}", result.err());
    assert_eq!(result.unwrap(), payload);
}

#[tokio::test]
async fn test_generate_surfaces_remote_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let schema = classification_schema();
    let err = backend
        .generate_structured("classify anything", &schema)
        .await
        .unwrap_err();

    match err {
        Error::Classification(msg) => {
            assert!(msg.contains("429"), "message should carry the status: {}", msg);
            assert!(msg.contains("quota exceeded"));
        }
        other => panic!("Expected Classification error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_fails_on_empty_candidates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let schema = classification_schema();
    let err = backend
        .generate_structured("classify anything", &schema)
        .await
        .unwrap_err();

    match err {
        Error::Classification(msg) => assert!(msg.contains("no candidates")),
        other => panic!("Expected Classification error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_health_check_probes_models_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    assert!(backend.health_check().await.unwrap());
}

#[tokio::test]
async fn test_health_check_reports_unhealthy_on_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    assert!(!backend.health_check().await.unwrap());
}
