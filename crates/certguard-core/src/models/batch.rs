use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-file entry of a batch outcome, in submission order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchFileResult {
    pub file_name: String,
    pub is_valid: bool,
    /// Integer confidence in [60, 100] for processed files.
    pub confidence: u8,
    /// Whether screening completed for this file. A file whose screening
    /// failed is reported here rather than aborting the batch.
    pub processed: bool,
}

/// Outcome of one batch submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub total_processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<BatchFileResult>,
}

impl BatchResult {
    /// Aggregate per-file entries, keeping submission order.
    /// Invariant: `successful + failed == total_processed == results.len()`.
    pub fn from_results(results: Vec<BatchFileResult>) -> Self {
        let total_processed = results.len();
        let successful = results.iter().filter(|r| r.processed && r.is_valid).count();
        BatchResult {
            total_processed,
            successful,
            failed: total_processed - successful,
            results,
        }
    }
}
