//! Storage for the document corpus and its retrieval

pub mod knowledge_base;
pub mod ranking;


pub use knowledge_base::{Document, DocumentSummary, IngestItem, KnowledgeStore, SEED_DOCUMENTS};
pub use ranking::{ScoredDocument, rank};
