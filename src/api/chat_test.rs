//! Tests for the chat endpoint

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt; // for oneshot()

use super::chat::ChatRequest;
use super::test_support::*;
use crate::api;
use crate::storage::{IngestItem, KnowledgeStore};

fn chat_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn item(id: &str, text: &str) -> IngestItem {
    IngestItem {
        id: Some(id.to_string()),
        text: Some(text.to_string()),
    }
}

#[tokio::test]
async fn chat_request_accepts_top_k_alias() {
    let request: ChatRequest =
        serde_json::from_value(json!({"query": "hello", "topK": 5})).unwrap();
    assert_eq!(request.query.as_deref(), Some("hello"));
    assert_eq!(request.top_k, Some(5));

    // topK may be negative on the wire; it clamps to an empty result later.
    let negative: ChatRequest =
        serde_json::from_value(json!({"query": "hello", "topK": -2})).unwrap();
    assert_eq!(negative.top_k, Some(-2));
}

#[tokio::test]
async fn missing_query_is_rejected_with_400() {
    let path = temp_snapshot("chat-missing-query");
    let state = state(
        KnowledgeStore::new(&path),
        StubEmbedder(vec![1.0]),
        StubGenerator("unused".to_string()),
    );
    let app = api::router(state);

    let response = app.oneshot(chat_request(json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "query is required");
}

#[tokio::test]
async fn blank_query_is_rejected_with_400() {
    let path = temp_snapshot("chat-blank-query");
    let state = state(
        KnowledgeStore::new(&path),
        StubEmbedder(vec![1.0]),
        StubGenerator("unused".to_string()),
    );
    let app = api::router(state);

    let response = app
        .oneshot(chat_request(json!({"query": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "query is required");
}

#[tokio::test]
async fn chat_answers_with_best_matching_source() {
    let path = temp_snapshot("chat-happy");
    let store = KnowledgeStore::new(&path);

    // Two documents with orthogonal embeddings, then the query embedding.
    let embedder = SequenceEmbedder::new(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0]]);
    store
        .ingest(&embedder, vec![item("d1", "about llamas"), item("d2", "about react")])
        .await
        .unwrap();

    let state = state(store, embedder, StubGenerator("Llamas are small.".to_string()));
    let app = api::router(state);

    let response = app
        .oneshot(chat_request(json!({"query": "tell me about llamas", "topK": 1})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["response"], "Llamas are small.");
    assert!(body["elapsed"].as_f64().unwrap() >= 0.0);

    let sources = body["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0]["id"], "d1");
    assert!((sources[0]["score"].as_f64().unwrap() - 1.0).abs() < 1e-4);
    assert!(sources[0]["timestamp"].is_string());
    // Sources never include document text or embeddings.
    assert!(sources[0].get("text").is_none());
    assert!(sources[0].get("embedding").is_none());

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn top_k_defaults_to_three() {
    let path = temp_snapshot("chat-default-topk");
    let store = KnowledgeStore::new(&path);

    let embedder = SequenceEmbedder::new(vec![
        vec![1.0, 0.0],
        vec![0.9, 0.1],
        vec![0.8, 0.2],
        vec![0.7, 0.3],
        vec![1.0, 0.0], // query
    ]);
    store
        .ingest(
            &embedder,
            vec![
                item("a", "one"),
                item("b", "two"),
                item("c", "three"),
                item("d", "four"),
            ],
        )
        .await
        .unwrap();

    let state = state(store, embedder, StubGenerator("ok".to_string()));
    let app = api::router(state);

    let response = app
        .oneshot(chat_request(json!({"query": "anything"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["sources"].as_array().unwrap().len(), 3);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn provider_failure_surfaces_as_500() {
    let path = temp_snapshot("chat-provider-down");
    let state = state(
        KnowledgeStore::new(&path),
        FailingEmbedder,
        StubGenerator("unused".to_string()),
    );
    let app = api::router(state);

    let response = app
        .oneshot(chat_request(json!({"query": "hello"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response.into_body()).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("embedding backend down")
    );
}
