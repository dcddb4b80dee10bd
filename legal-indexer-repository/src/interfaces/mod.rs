//! Interface definitions for the search index backends.
//!
//! This module defines the abstract `SearchIndexProvider` trait that allows
//! the Azure and in-memory backends to be swapped behind `SearchIndexClient`.

mod search_index_provider;

pub use search_index_provider::SearchIndexProvider;
