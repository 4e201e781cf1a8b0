//! External model providers for embedding and text generation

pub mod ollama;

pub use ollama::{OllamaEmbeddings, OllamaGenerator};

use crate::core::Result;
use async_trait::async_trait;

#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    fn name(&self) -> &str;
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

#[async_trait]
pub trait GenerationModel: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, prompt: &str) -> Result<String>;
}
