//! Batch limits for the SearchIndexClient.

/// Azure Cognitive Search rejects index batches above this many documents.
pub const AZURE_MAX_BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndexConfig {
    /// Largest batch `upsert_many` will submit. `None` disables the check.
    pub max_batch_size: Option<usize>,
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            max_batch_size: Some(AZURE_MAX_BATCH_SIZE),
        }
    }
}

impl SearchIndexConfig {
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
        }
    }

    /// Build from a configured limit, where `0` means no limit.
    pub fn from_limit(limit: usize) -> Self {
        Self {
            max_batch_size: (limit > 0).then_some(limit),
        }
    }
}
