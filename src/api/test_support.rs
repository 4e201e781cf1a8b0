//! Shared stubs and helpers for API handler tests

use async_trait::async_trait;
use axum::body::Body;
use http_body_util::BodyExt;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::AppState;
use crate::core::{RagError, Result};
use crate::models::{EmbeddingModel, GenerationModel};
use crate::storage::KnowledgeStore;

/// Always returns the same embedding.
pub struct StubEmbedder(pub Vec<f32>);

#[async_trait]
impl EmbeddingModel for StubEmbedder {
    fn name(&self) -> &str {
        "stub-embedder"
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(self.0.clone())
    }
}

/// Returns each embedding in turn, erroring once the sequence runs dry.
pub struct SequenceEmbedder {
    vectors: Mutex<VecDeque<Vec<f32>>>,
}

impl SequenceEmbedder {
    pub fn new(vectors: Vec<Vec<f32>>) -> Self {
        Self {
            vectors: Mutex::new(vectors.into()),
        }
    }
}

#[async_trait]
impl EmbeddingModel for SequenceEmbedder {
    fn name(&self) -> &str {
        "sequence-embedder"
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        self.vectors
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| RagError::Provider("sequence exhausted".to_string()))
    }
}

/// Fails every call, like an unreachable embedding backend.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingModel for FailingEmbedder {
    fn name(&self) -> &str {
        "failing-embedder"
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RagError::Provider("embedding backend down".to_string()))
    }
}

/// Always answers with the same canned text.
pub struct StubGenerator(pub String);

#[async_trait]
impl GenerationModel for StubGenerator {
    fn name(&self) -> &str {
        "stub-generator"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

pub fn temp_snapshot(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "rag-service-api-{}-{}.json",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

pub fn state(
    store: KnowledgeStore,
    embedder: impl EmbeddingModel + 'static,
    generator: impl GenerationModel + 'static,
) -> AppState {
    AppState {
        store: Arc::new(store),
        embedder: Arc::new(embedder),
        generator: Arc::new(generator),
    }
}

pub async fn json_body(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
