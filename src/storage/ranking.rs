//! Top-K retrieval over the document corpus
//!
//! A full linear scan: every embedded document is scored against the query
//! vector and the best `top_k` are returned. Documents that have not been
//! embedded yet are excluded from ranking rather than scored against an
//! absent vector.

use super::Document;
use crate::core::cosine_similarity;
use chrono::{DateTime, Utc};

/// A document paired with its similarity score for one query. Ephemeral,
/// never persisted.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub id: String,
    pub text: String,
    pub score: f32,
    pub timestamp: DateTime<Utc>,
}

/// Rank documents by descending cosine similarity to `query_vector` and
/// keep the first `top_k`. The sort is stable, so ties preserve insertion
/// order. Result length is `min(top_k, embedded corpus size)`.
pub fn rank(documents: &[Document], query_vector: &[f32], top_k: usize) -> Vec<ScoredDocument> {
    let mut scored: Vec<ScoredDocument> = documents
        .iter()
        .filter_map(|document| {
            let embedding = document.embedding.as_ref()?;
            Some(ScoredDocument {
                id: document.id.clone(),
                text: document.text.clone(),
                score: cosine_similarity(query_vector, embedding),
                timestamp: document.timestamp,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_k);
    scored
}
