//! Retrieval-augmented chat endpoint

use axum::extract::State;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::AppState;
use crate::core::{RagError, Result};
use crate::storage::ScoredDocument;

const DEFAULT_TOP_K: i64 = 3;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: Option<String>,
    #[serde(default, rename = "topK")]
    pub top_k: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChatSource {
    pub id: String,
    pub score: f32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub elapsed: f64,
    pub sources: Vec<ChatSource>,
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let started = Instant::now();

    let query = request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| RagError::Validation("query is required".to_string()))?;

    // A non-positive topK yields no sources.
    let top_k = request.top_k.unwrap_or(DEFAULT_TOP_K).max(0) as usize;

    let query_embedding = state.embedder.embed(query).await?;
    let matches = state.store.top_matches(&query_embedding, top_k).await;

    let prompt = build_prompt(query, &matches);
    let response = state.generator.generate(&prompt).await?;

    let sources = matches
        .into_iter()
        .map(|scored| ChatSource {
            id: scored.id,
            score: round_score(scored.score),
            timestamp: scored.timestamp,
        })
        .collect();

    Ok(Json(ChatResponse {
        response,
        elapsed: started.elapsed().as_secs_f64(),
        sources,
    }))
}

fn build_prompt(query: &str, matches: &[ScoredDocument]) -> String {
    let mut prompt = String::from("Answer the question using only the context below.\n\nContext:\n");
    for (index, scored) in matches.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", index + 1, scored.text));
    }
    prompt.push_str(&format!("\nQuestion: {query}\nAnswer:"));
    prompt
}

/// Scores are reported to four decimal places.
fn round_score(score: f32) -> f32 {
    (score * 10_000.0).round() / 10_000.0
}
