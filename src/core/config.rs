//! Configuration for the RAG service

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub embedding_model: String,
    pub generation_model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub snapshot_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            provider: ProviderConfig {
                base_url: "http://localhost:11434".to_string(),
                embedding_model: "nomic-embed-text".to_string(),
                generation_model: "tinyllama".to_string(),
                timeout: Duration::from_secs(30),
            },
            storage: StorageConfig {
                snapshot_path: "kb.json".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> crate::core::Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("RAG_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("RAG_PORT") {
            config.server.port = port.parse().unwrap_or(3000);
        }
        if let Ok(base_url) = std::env::var("OLLAMA_URL") {
            config.provider.base_url = base_url;
        }
        if let Ok(embedding_model) = std::env::var("EMBEDDING_MODEL") {
            config.provider.embedding_model = embedding_model;
        }
        if let Ok(generation_model) = std::env::var("GENERATION_MODEL") {
            config.provider.generation_model = generation_model;
        }
        if let Ok(timeout) = std::env::var("PROVIDER_TIMEOUT_SECS") {
            config.provider.timeout = Duration::from_secs(timeout.parse().unwrap_or(30));
        }
        if let Ok(snapshot_path) = std::env::var("KB_PATH") {
            config.storage.snapshot_path = snapshot_path;
        }

        Ok(config)
    }
}
