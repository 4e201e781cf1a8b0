//! API endpoints for the RAG service

pub mod chat;
pub mod health;
pub mod kb;

#[cfg(test)]
mod chat_test;
#[cfg(test)]
mod test_support;

pub use chat::chat;
pub use health::health_check;
pub use kb::{ingest_documents, list_documents};

use axum::Router;
use axum::routing::{get, post};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/kb", get(list_documents))
        .route("/ingest", post(ingest_documents))
        .route("/chat", post(chat))
        .with_state(state)
}
