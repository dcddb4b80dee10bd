//! Azure Blob Storage implementation of the blob store provider, built on
//! the `azure_storage_blob` SDK.

mod auth;
mod client;
mod config;

pub use auth::build_credential;
pub use client::AzureBlobStore;
pub use config::AzureBlobConfig;
