//! Result types reported by the orchestrator.

use std::fmt;

use legal_indexer_repository::IndexStatistics;
use serde::Serialize;

/// Stage a file was in when its ingestion stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStage {
    Pending,
    Extracting,
    Uploading,
    Indexing,
}

impl fmt::Display for IngestionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Extracting => "extracting",
            Self::Uploading => "uploading",
            Self::Indexing => "indexing",
        };
        f.write_str(name)
    }
}

/// Final state of a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Succeeded {
        document_id: String,
        blob_name: String,
    },
    Failed {
        stage: IngestionStage,
        reason: String,
    },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Per-directory counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestionSummary {
    pub successful: usize,
    /// Upload or index failures.
    pub failed: usize,
    /// Files with an unsupported extension.
    pub skipped: usize,
}

impl IngestionSummary {
    pub fn total(&self) -> usize {
        self.successful + self.failed + self.skipped
    }

    pub(crate) fn record(&mut self, outcome: &FileOutcome) {
        if outcome.is_success() {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
    }
}

impl fmt::Display for IngestionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "successful={} failed={} skipped={}",
            self.successful, self.failed, self.skipped
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlobStorageStatistics {
    pub document_count: usize,
    pub container_name: String,
}

/// Document counts on both sides of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStatistics {
    pub blob_storage: BlobStorageStatistics,
    pub search_index: IndexStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut summary = IngestionSummary::default();
        summary.record(&FileOutcome::Succeeded {
            document_id: "a".to_string(),
            blob_name: "a.txt".to_string(),
        });
        summary.record(&FileOutcome::Failed {
            stage: IngestionStage::Uploading,
            reason: "boom".to_string(),
        });
        summary.skipped += 1;

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.to_string(), "successful=1 failed=1 skipped=1");
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = FileOutcome::Failed {
            stage: IngestionStage::Indexing,
            reason: "rejected".to_string(),
        };

        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "failed");
        assert_eq!(json["stage"], "indexing");
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_summary_serialization() {
        let summary = IngestionSummary {
            successful: 2,
            failed: 0,
            skipped: 1,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json, serde_json::json!({"successful": 2, "failed": 0, "skipped": 1}));
    }
}
