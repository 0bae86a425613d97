//! Batch executor
//!
//! Produces one `BatchResult` for up to `max_files` admitted artifacts. The
//! batch is a distinct, coarser-grained operation: one aggregate delay covers
//! the whole batch rather than one per file. Per-file screenings are
//! independent, and a failed screening marks only that entry as unprocessed
//! instead of aborting the batch.

use std::sync::Arc;
use std::time::Duration;

use certguard_core::models::{BatchFileResult, BatchResult, UploadedArtifact};
use certguard_core::AppError;

use crate::analyzer::Analyzer;

pub struct BatchExecutor {
    analyzer: Arc<dyn Analyzer>,
    delay: Duration,
    timeout: Duration,
    max_files: usize,
}

impl BatchExecutor {
    pub fn new(
        analyzer: Arc<dyn Analyzer>,
        delay: Duration,
        timeout: Duration,
        max_files: usize,
    ) -> Self {
        BatchExecutor {
            analyzer,
            delay,
            timeout,
            max_files,
        }
    }

    /// Verify an ordered batch of admitted artifacts.
    ///
    /// The count cap is re-checked here even though the gateway also enforces
    /// it; the gateway limit is configuration and may drift.
    pub async fn verify_batch(
        &self,
        artifacts: &[UploadedArtifact],
    ) -> Result<BatchResult, AppError> {
        if artifacts.is_empty() {
            return Err(AppError::NoFileProvided);
        }
        if artifacts.len() > self.max_files {
            return Err(AppError::TooManyFiles {
                count: artifacts.len(),
                max: self.max_files,
            });
        }

        let start = std::time::Instant::now();

        let run = async {
            tokio::time::sleep(self.delay).await;

            let mut results = Vec::with_capacity(artifacts.len());
            for artifact in artifacts {
                match self.analyzer.screen(artifact).await {
                    Ok(screening) => results.push(BatchFileResult {
                        file_name: artifact.original_name.clone(),
                        is_valid: screening.is_valid,
                        confidence: screening.confidence,
                        processed: true,
                    }),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            artifact_id = %artifact.id,
                            "Screening failed for batch entry"
                        );
                        results.push(BatchFileResult {
                            file_name: artifact.original_name.clone(),
                            is_valid: false,
                            confidence: 0,
                            processed: false,
                        });
                    }
                }
            }
            results
        };

        let results = tokio::time::timeout(self.timeout, run).await.map_err(|_| {
            tracing::warn!(
                batch_size = artifacts.len(),
                limit_secs = self.timeout.as_secs(),
                "Batch verification exceeded latency bound"
            );
            AppError::ProcessingTimeout {
                limit_secs: self.timeout.as_secs(),
            }
        })?;

        let batch = BatchResult::from_results(results);

        tracing::info!(
            total_processed = batch.total_processed,
            successful = batch.successful,
            failed = batch.failed,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Batch verification complete"
        );

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerError, CatalogAnalyzer, Screening};
    use async_trait::async_trait;
    use certguard_core::models::VerificationResult;
    use chrono::Utc;
    use uuid::Uuid;

    fn artifact(name: &str) -> UploadedArtifact {
        UploadedArtifact {
            id: Uuid::new_v4(),
            original_name: name.to_string(),
            storage_key: format!("artifacts/1-{}-{}", Uuid::new_v4(), name),
            size_bytes: 1024,
            content_type: "application/pdf".to_string(),
            extension: "pdf".to_string(),
            admitted_at: Utc::now(),
        }
    }

    fn executor() -> BatchExecutor {
        BatchExecutor::new(
            Arc::new(CatalogAnalyzer::new()),
            Duration::ZERO,
            Duration::from_secs(30),
            10,
        )
    }

    #[tokio::test]
    async fn batch_counts_and_order_hold() {
        let artifacts: Vec<_> = (0..5).map(|i| artifact(&format!("cert{}.pdf", i))).collect();
        let batch = executor().verify_batch(&artifacts).await.unwrap();

        assert_eq!(batch.total_processed, 5);
        assert_eq!(batch.results.len(), 5);
        assert_eq!(batch.successful + batch.failed, batch.total_processed);
        for (entry, artifact) in batch.results.iter().zip(&artifacts) {
            assert_eq!(entry.file_name, artifact.original_name);
            assert!(entry.processed);
            assert!((60..=100).contains(&entry.confidence));
        }
    }

    #[tokio::test]
    async fn batch_over_cap_is_rejected() {
        let artifacts: Vec<_> = (0..11).map(|i| artifact(&format!("cert{}.pdf", i))).collect();
        let err = executor().verify_batch(&artifacts).await.unwrap_err();
        assert!(matches!(err, AppError::TooManyFiles { count: 11, max: 10 }));
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let err = executor().verify_batch(&[]).await.unwrap_err();
        assert!(matches!(err, AppError::NoFileProvided));
    }

    /// Fails screening for every other file.
    struct FlakyAnalyzer;

    #[async_trait]
    impl Analyzer for FlakyAnalyzer {
        async fn analyze(
            &self,
            _artifact: &UploadedArtifact,
        ) -> Result<VerificationResult, AnalyzerError> {
            Err(AnalyzerError::Failed("unused".to_string()))
        }

        async fn screen(&self, artifact: &UploadedArtifact) -> Result<Screening, AnalyzerError> {
            if artifact.original_name.contains("bad") {
                Err(AnalyzerError::Failed("unreadable".to_string()))
            } else {
                Ok(Screening {
                    is_valid: true,
                    confidence: 90,
                })
            }
        }
    }

    #[tokio::test]
    async fn failed_screening_marks_entry_not_batch() {
        let executor = BatchExecutor::new(
            Arc::new(FlakyAnalyzer),
            Duration::ZERO,
            Duration::from_secs(30),
            10,
        );

        let artifacts = vec![artifact("good.pdf"), artifact("bad.pdf")];
        let batch = executor.verify_batch(&artifacts).await.unwrap();

        assert_eq!(batch.total_processed, 2);
        assert_eq!(batch.successful, 1);
        assert_eq!(batch.failed, 1);
        assert!(batch.results[0].processed);
        assert!(!batch.results[1].processed);
        assert!(!batch.results[1].is_valid);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_aggregate_not_per_file() {
        let executor = BatchExecutor::new(
            Arc::new(CatalogAnalyzer::new()),
            Duration::from_secs(3),
            Duration::from_secs(30),
            10,
        );

        let artifacts: Vec<_> = (0..10).map(|i| artifact(&format!("cert{}.pdf", i))).collect();
        let start = tokio::time::Instant::now();
        executor.verify_batch(&artifacts).await.unwrap();

        // ten files still take one aggregate delay
        assert!(start.elapsed() < Duration::from_secs(4));
    }
}
