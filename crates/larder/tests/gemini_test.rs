//! Wiremock tests for the Gemini generator and its use behind RecipeService.

use larder::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn generator(server: &MockServer) -> GeminiGenerator {
    GeminiGenerator::new(GeminiConfig::new("test-key").base_url(server.uri()))
        .expect("config is valid")
}

fn candidate(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn generate_returns_first_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "make soup" }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(r#"{"recipes":[]}"#)))
        .expect(1)
        .mount(&server)
        .await;

    let text = generator(&server).generate("make soup").await.unwrap();
    assert_eq!(text, r#"{"recipes":[]}"#);
}

#[tokio::test]
async fn api_error_message_is_extracted() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
        })))
        .mount(&server)
        .await;

    let err = generator(&server).generate("p").await.unwrap_err();
    match err {
        GenerationError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_is_kept_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = generator(&server).generate("p").await.unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Api { status: 502, ref message } if message == "bad gateway"
    ));
}

#[tokio::test]
async fn missing_candidates_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = generator(&server).generate("p").await.unwrap_err();
    assert!(matches!(err, GenerationError::EmptyResponse));
}

#[tokio::test]
async fn service_caches_gemini_output() {
    let server = MockServer::start().await;
    let body = json!({
        "recipes": [
            { "title": "Fried rice", "match_score": 40 },
            { "title": "Omelette", "match_score": 85 }
        ]
    });

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(&body.to_string())))
        .expect(1)
        .mount(&server)
        .await;

    let service = RecipeService::new(MemoryStore::with_defaults(), generator(&server));
    let request = RecipeRequest::new(vec![
        PantryItemRaw::new("eggs", 4.0),
        PantryItemRaw::new("rice", 1.0),
    ]);

    let first = service.handle(&request).await.unwrap();
    assert_eq!(first.cache, CacheStatus::Miss);
    assert_eq!(first.recipes[0].title(), Some("Omelette"));

    let second = service.handle(&request).await.unwrap();
    assert_eq!(second.cache, CacheStatus::Hit);
    assert_eq!(second.recipes, first.recipes);

    let entry = service
        .gateway()
        .entry(&Fingerprint::from(first.fingerprint.clone()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.model, "gemini-1.5-flash");
}
