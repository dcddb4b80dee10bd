//! Azure Cognitive Search implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! that talks to the Azure Cognitive Search REST API.

mod client;
mod index_schema;
mod queries;

pub use client::{AzureSearchConfig, AzureSearchProvider, DEFAULT_API_VERSION};
pub use index_schema::index_definition;
