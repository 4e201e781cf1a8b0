//! Error types for the RAG service

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RagError {
    #[error("{0}")]
    Validation(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RagError>;

impl From<std::io::Error> for RagError {
    fn from(err: std::io::Error) -> Self {
        RagError::Snapshot(err.to_string())
    }
}

impl From<serde_json::Error> for RagError {
    fn from(err: serde_json::Error) -> Self {
        RagError::Snapshot(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for RagError {
    fn from(err: reqwest::Error) -> Self {
        RagError::Provider(err.to_string())
    }
}

impl IntoResponse for RagError {
    fn into_response(self) -> Response {
        let status = match &self {
            RagError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
