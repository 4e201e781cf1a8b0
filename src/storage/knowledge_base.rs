//! Document corpus with JSON snapshot persistence
//!
//! The corpus is an insertion-ordered sequence of documents guarded by a
//! single `RwLock`. Every mutation path holds the write guard across the
//! full read-modify-persist sequence, so concurrent ingest requests are
//! serialized against each other and against snapshot writes.

use crate::core::{RagError, Result};
use crate::models::EmbeddingModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

pub const SEED_DOCUMENTS: [(&str, &str); 2] = [
    (
        "d1",
        "TinyLlama is a small language model optimized for fast inference on modest hardware.",
    ),
    (
        "d2",
        "React Native builds mobile apps using JavaScript and native widgets for iOS and Android.",
    ),
];

/// A stored document. `text` and `timestamp` never change after creation;
/// `embedding` transitions from absent to present exactly once (backfill or
/// ingest-time embedding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    pub timestamp: DateTime<Utc>,
}

/// Outward-facing view of a document. Embeddings are never exposed except
/// indirectly through similarity scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// One item of an ingest batch. Both fields are optional on the wire;
/// items missing either are skipped rather than rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestItem {
    pub id: Option<String>,
    pub text: Option<String>,
}

impl IngestItem {
    fn id_and_text(&self) -> Option<(&str, &str)> {
        let id = self.id.as_deref().filter(|s| !s.trim().is_empty())?;
        let text = self.text.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((id, text))
    }
}

pub struct KnowledgeStore {
    snapshot_path: PathBuf,
    documents: RwLock<Vec<Document>>,
}

impl KnowledgeStore {
    pub fn new(snapshot_path: impl AsRef<Path>) -> Self {
        Self {
            snapshot_path: snapshot_path.as_ref().to_path_buf(),
            documents: RwLock::new(Vec::new()),
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Populate the corpus from the snapshot file, or seed it when no
    /// snapshot exists. Startup-only: calling this mid-lifetime would
    /// discard unpersisted in-memory documents.
    ///
    /// Once the snapshot file exists, a read or parse failure is an error;
    /// there is no fallback to seed data.
    pub async fn load(&self) -> Result<()> {
        let loaded = if self.snapshot_path.exists() {
            let raw = tokio::fs::read_to_string(&self.snapshot_path).await?;
            let documents: Vec<Document> = serde_json::from_str(&raw)?;
            tracing::info!(
                count = documents.len(),
                path = %self.snapshot_path.display(),
                "loaded knowledge base snapshot"
            );
            documents
        } else {
            let now = Utc::now();
            let documents: Vec<Document> = SEED_DOCUMENTS
                .iter()
                .map(|(id, text)| Document {
                    id: id.to_string(),
                    text: text.to_string(),
                    embedding: None,
                    timestamp: now,
                })
                .collect();
            tracing::info!(count = documents.len(), "no snapshot found, seeded knowledge base");
            documents
        };

        *self.documents.write().await = loaded;
        Ok(())
    }

    /// Embed every document still lacking an embedding, one at a time, then
    /// persist the full corpus. A provider failure aborts the operation:
    /// documents embedded before the failure keep their embeddings in
    /// memory, but nothing is persisted.
    pub async fn backfill_embeddings(&self, embedder: &dyn EmbeddingModel) -> Result<()> {
        let mut documents = self.documents.write().await;

        let mut backfilled = 0usize;
        for document in documents.iter_mut() {
            if document.embedding.is_some() {
                continue;
            }
            let embedding = embedder.embed(&document.text).await?;
            document.embedding = Some(embedding);
            backfilled += 1;
        }

        if backfilled > 0 {
            tracing::info!(count = backfilled, "backfilled missing embeddings");
        }
        self.write_snapshot(&documents).await
    }

    /// Ingest a batch of documents: skip items missing an id or text, embed
    /// the rest sequentially, append each with its ingestion timestamp, and
    /// persist once after the loop.
    ///
    /// Returns the length of the input batch, not the number of documents
    /// appended. A provider failure on item N aborts the remaining items;
    /// the already-appended prefix stays in memory but is not persisted.
    /// Duplicate ids are appended, not deduplicated.
    pub async fn ingest(
        &self,
        embedder: &dyn EmbeddingModel,
        batch: Vec<IngestItem>,
    ) -> Result<usize> {
        let attempted = batch.len();
        let mut documents = self.documents.write().await;

        for item in &batch {
            let Some((id, text)) = item.id_and_text() else {
                tracing::warn!("skipping ingest item with missing id or text");
                continue;
            };
            let embedding = embedder.embed(text).await?;
            documents.push(Document {
                id: id.to_string(),
                text: text.to_string(),
                embedding: Some(embedding),
                timestamp: Utc::now(),
            });
        }

        self.write_snapshot(&documents).await?;
        tracing::info!(attempted, total = documents.len(), "ingested document batch");
        Ok(attempted)
    }

    /// Overwrite the snapshot file with the current corpus.
    pub async fn persist(&self) -> Result<()> {
        let documents = self.documents.read().await;
        self.write_snapshot(&documents).await
    }

    pub async fn list(&self) -> Vec<DocumentSummary> {
        self.documents
            .read()
            .await
            .iter()
            .map(|document| DocumentSummary {
                id: document.id.clone(),
                text: document.text.clone(),
                timestamp: document.timestamp,
            })
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Score every embedded document against the query vector and return the
    /// top `top_k` in descending score order.
    pub async fn top_matches(
        &self,
        query_vector: &[f32],
        top_k: usize,
    ) -> Vec<super::ScoredDocument> {
        let documents = self.documents.read().await;
        super::rank(&documents, query_vector, top_k)
    }

    /// Full corpus clone, embeddings included. Test and diagnostics use.
    pub async fn documents(&self) -> Vec<Document> {
        self.documents.read().await.clone()
    }

    async fn write_snapshot(&self, documents: &[Document]) -> Result<()> {
        if let Some(parent) = self.snapshot_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let serialized = serde_json::to_string_pretty(documents)?;
        tokio::fs::write(&self.snapshot_path, serialized)
            .await
            .map_err(|e| {
                RagError::Snapshot(format!(
                    "failed to write {}: {}",
                    self.snapshot_path.display(),
                    e
                ))
            })
    }
}
