//! # Legal Indexer Ingest
//!
//! This crate provides the ingestion components that move local legal
//! documents into blob storage and the search index.
//!
//! ## Architecture
//!
//! Each file passes through three stages:
//!
//! 1. **Extracting**: Reads the text that becomes the record's content
//! 2. **Uploading**: Stores the original file as a blob
//! 3. **Indexing**: Writes the search record pointing at the blob
//!
//! The **Orchestrator** runs the stages per file and aggregates directory
//! results.

pub mod errors;
pub mod orchestrator;
pub mod processor;
pub mod types;

pub use errors::IngestError;
pub use orchestrator::Orchestrator;
pub use processor::DocumentMetadata;
pub use types::{FileOutcome, IngestionStage, IngestionSummary, PipelineStatistics};
