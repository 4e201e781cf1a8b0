//! RAG Service Library
//!
//! A minimal retrieval-augmented generation service: documents are stored
//! with vector embeddings from an external embedding model, ranked against
//! queries by cosine similarity, and the top matches are handed to an
//! external generation model to produce a grounded answer.

pub mod api;
pub mod core;
pub mod models;
pub mod storage;

use std::sync::Arc;

use crate::core::{Config, Result};
use crate::models::{EmbeddingModel, GenerationModel, OllamaEmbeddings, OllamaGenerator};
use crate::storage::KnowledgeStore;

// Application state for Axum
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<KnowledgeStore>,
    pub embedder: Arc<dyn EmbeddingModel>,
    pub generator: Arc<dyn GenerationModel>,
}

pub struct RagService {
    pub config: Config,
    pub store: Arc<KnowledgeStore>,
    pub embedder: Arc<dyn EmbeddingModel>,
    pub generator: Arc<dyn GenerationModel>,
}

impl RagService {
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(KnowledgeStore::new(&config.storage.snapshot_path));
        let embedder: Arc<dyn EmbeddingModel> = Arc::new(OllamaEmbeddings::new(&config)?);
        let generator: Arc<dyn GenerationModel> = Arc::new(OllamaGenerator::new(&config)?);

        Ok(Self {
            config,
            store,
            embedder,
            generator,
        })
    }

    /// Startup sequence: load the snapshot (or seed an empty store), then
    /// backfill embeddings for any document missing one. A backfill failure
    /// degrades rather than aborts — unembedded documents are simply
    /// invisible to ranking until a later ingest or restart succeeds.
    pub async fn initialize(&self) -> Result<()> {
        self.store.load().await?;
        if let Err(err) = self
            .store
            .backfill_embeddings(self.embedder.as_ref())
            .await
        {
            tracing::warn!("embedding backfill failed, continuing without: {err}");
        }
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            store: self.store.clone(),
            embedder: self.embedder.clone(),
            generator: self.generator.clone(),
        }
    }
}
