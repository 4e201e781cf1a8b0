//! Core functionality for the RAG service

pub mod config;
pub mod error;
pub mod similarity;

pub use config::{Config, ProviderConfig, ServerConfig, StorageConfig};
pub use error::{RagError, Result};
pub use similarity::cosine_similarity;
