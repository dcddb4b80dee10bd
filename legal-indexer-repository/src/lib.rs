//! # Legal Indexer Repository
//!
//! This crate provides traits and implementations for interacting with the
//! search index. It includes definitions for errors, interfaces, a concrete
//! implementation for Azure Cognitive Search and an in-memory implementation
//! for offline use.

pub mod azure;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod types;

pub use azure::{AzureSearchConfig, AzureSearchProvider};
pub use client::SearchIndexClient;
pub use config::{SearchIndexConfig, AZURE_MAX_BATCH_SIZE};
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use memory::InMemorySearchProvider;
pub use types::{BatchOperationResult, BatchOperationSummary, IndexStatistics, UpsertDocumentRequest};
