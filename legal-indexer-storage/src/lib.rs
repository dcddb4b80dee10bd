//! # Legal Indexer Storage
//!
//! Blob storage for uploaded legal documents. Provides the
//! `BlobStoreProvider` trait, an Azure Blob Storage implementation, an
//! in-memory mock for search-only setups, and the `DocumentStorage` client
//! that moves local files in and out of the container.

pub mod azure;
pub mod client;
pub mod errors;
pub mod interfaces;
pub mod mock;

pub use azure::{AzureBlobConfig, AzureBlobStore};
pub use client::DocumentStorage;
pub use errors::StorageError;
pub use interfaces::BlobStoreProvider;
pub use mock::{MockBlobStore, DEFAULT_MOCK_BASE_URL};
