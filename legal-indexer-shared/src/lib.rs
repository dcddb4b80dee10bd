//! # Legal Indexer Shared
//!
//! Types shared by the storage, search and ingest crates: the document record
//! persisted to the search index, search queries and hits, and the helpers
//! that derive record metadata from a filename.

mod document;
mod query;

pub use document::{
    default_summary, document_id, file_extension, is_supported_extension, utc_timestamp,
    DocumentRecord, SUPPORTED_EXTENSIONS,
};
pub use query::{DocumentHit, SearchQuery, DEFAULT_SEARCH_LIMIT};
