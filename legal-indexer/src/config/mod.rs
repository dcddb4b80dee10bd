//! Configuration and dependency wiring.

mod dependencies;
mod settings;

pub use dependencies::{search_provider, storage_provider, Dependencies};
pub use settings::{Settings, DEFAULT_CONTAINER_NAME, DEFAULT_INDEX_NAME};
