//! Knowledge base endpoints: listing and ingestion

use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::core::Result;
use crate::storage::{DocumentSummary, IngestItem};

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub documents: Vec<IngestItem>,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub added: usize,
}

pub async fn list_documents(State(state): State<AppState>) -> Json<Vec<DocumentSummary>> {
    Json(state.store.list().await)
}

pub async fn ingest_documents(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>> {
    let added = state
        .store
        .ingest(state.embedder.as_ref(), request.documents)
        .await?;
    Ok(Json(IngestResponse { added }))
}
