//! Ollama model integration via HTTP API
//!
//! Connects to a local or remote Ollama server. Embeddings use the
//! `/api/embeddings` endpoint, text generation uses `/api/generate`.

use crate::core::{Config, RagError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request body for the Ollama embeddings API
#[derive(Debug, Serialize)]
struct OllamaEmbeddingRequest {
    model: String,
    input: String,
}

/// Response from the Ollama embeddings API
#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

/// Request body for the Ollama generate API
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from the Ollama generate API
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

fn build_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.provider.timeout)
        .build()
        .map_err(|e| RagError::Config(format!("Failed to create HTTP client: {}", e)))
}

pub struct OllamaEmbeddings {
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OllamaEmbeddings {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            model: config.provider.embedding_model.clone(),
            base_url: config.provider.base_url.clone(),
            client: build_client(config)?,
        })
    }
}

#[async_trait]
impl crate::models::EmbeddingModel for OllamaEmbeddings {
    fn name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = OllamaEmbeddingRequest {
            model: self.model.clone(),
            input: text.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| RagError::Provider(format!("Ollama request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RagError::Provider(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let result: OllamaEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| RagError::Provider(format!("Failed to parse Ollama response: {}", e)))?;

        Ok(result.embedding)
    }
}

pub struct OllamaGenerator {
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OllamaGenerator {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            model: config.provider.generation_model.clone(),
            base_url: config.provider.base_url.clone(),
            client: build_client(config)?,
        })
    }
}

#[async_trait]
impl crate::models::GenerationModel for OllamaGenerator {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| RagError::Provider(format!("Ollama request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RagError::Provider(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let result: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| RagError::Provider(format!("Failed to parse Ollama response: {}", e)))?;

        Ok(result.response)
    }
}
