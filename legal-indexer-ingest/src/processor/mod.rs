//! Processor module for the ingestion pipeline.
//!
//! Extracts text from local files and builds search records.

mod document_processor;
pub mod extraction;

pub use document_processor::{DocumentMetadata, DocumentProcessor};
