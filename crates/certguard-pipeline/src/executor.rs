//! Verification executor
//!
//! Turns one admitted artifact into a `VerificationResult`. The simulated
//! processing latency stands in for real document analysis; it suspends
//! without blocking other concurrent submissions. Latency is bounded, and an
//! exceeded bound surfaces as `ProcessingTimeout`.

use std::sync::Arc;
use std::time::Duration;

use certguard_core::models::{UploadedArtifact, VerificationResult};
use certguard_core::AppError;

use crate::analyzer::Analyzer;

pub struct VerificationExecutor {
    analyzer: Arc<dyn Analyzer>,
    delay: Duration,
    timeout: Duration,
}

impl VerificationExecutor {
    pub fn new(analyzer: Arc<dyn Analyzer>, delay: Duration, timeout: Duration) -> Self {
        VerificationExecutor {
            analyzer,
            delay,
            timeout,
        }
    }

    /// Produce exactly one result for an admitted artifact.
    ///
    /// Never panics for a structurally valid artifact: analyzer failures are
    /// converted to `ProcessingFailed`, and a contradictory outcome
    /// (valid with tampering detected) is downgraded to invalid.
    pub async fn verify(&self, artifact: &UploadedArtifact) -> Result<VerificationResult, AppError> {
        let start = std::time::Instant::now();

        let outcome = tokio::time::timeout(self.timeout, async {
            tokio::time::sleep(self.delay).await;
            self.analyzer.analyze(artifact).await
        })
        .await;

        let mut result = match outcome {
            Err(_) => {
                tracing::warn!(
                    artifact_id = %artifact.id,
                    limit_secs = self.timeout.as_secs(),
                    "Verification exceeded latency bound"
                );
                return Err(AppError::ProcessingTimeout {
                    limit_secs: self.timeout.as_secs(),
                });
            }
            Ok(Err(e)) => {
                tracing::error!(
                    error = %e,
                    artifact_id = %artifact.id,
                    "Analyzer failed"
                );
                return Err(AppError::ProcessingFailed(e.to_string()));
            }
            Ok(Ok(result)) => result,
        };

        if result.enforce_consistency() {
            tracing::warn!(
                artifact_id = %artifact.id,
                "Analyzer produced a valid result with tampering detected; downgraded to invalid"
            );
        }

        tracing::info!(
            artifact_id = %artifact.id,
            is_valid = result.is_valid,
            confidence = result.confidence,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Verification complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerError, CatalogAnalyzer, Screening};
    use async_trait::async_trait;
    use certguard_core::models::ValidationChecks;
    use chrono::Utc;
    use uuid::Uuid;

    fn artifact() -> UploadedArtifact {
        UploadedArtifact {
            id: Uuid::new_v4(),
            original_name: "diploma.pdf".to_string(),
            storage_key: "artifacts/1-x-diploma.pdf".to_string(),
            size_bytes: 1024,
            content_type: "application/pdf".to_string(),
            extension: "pdf".to_string(),
            admitted_at: Utc::now(),
        }
    }

    struct FailingAnalyzer;

    #[async_trait]
    impl Analyzer for FailingAnalyzer {
        async fn analyze(
            &self,
            _artifact: &UploadedArtifact,
        ) -> Result<VerificationResult, AnalyzerError> {
            Err(AnalyzerError::Failed("engine crashed".to_string()))
        }

        async fn screen(&self, _artifact: &UploadedArtifact) -> Result<Screening, AnalyzerError> {
            Err(AnalyzerError::Failed("engine crashed".to_string()))
        }
    }

    /// Always claims validity while flagging tampering.
    struct ContradictoryAnalyzer;

    #[async_trait]
    impl Analyzer for ContradictoryAnalyzer {
        async fn analyze(
            &self,
            _artifact: &UploadedArtifact,
        ) -> Result<VerificationResult, AnalyzerError> {
            Ok(VerificationResult {
                is_valid: true,
                confidence: 99.0,
                institution_name: "Anywhere".to_string(),
                student_name: "Anyone".to_string(),
                degree: "Anything".to_string(),
                graduation_date: "2024".to_string(),
                issue_date: "2024".to_string(),
                certificate_id: "X-1".to_string(),
                risks: vec![],
                validation_checks: ValidationChecks {
                    signature_verified: true,
                    seal_authentic: true,
                    format_valid: true,
                    database_match: true,
                    tampering_detected: true,
                },
            })
        }

        async fn screen(&self, _artifact: &UploadedArtifact) -> Result<Screening, AnalyzerError> {
            Ok(Screening {
                is_valid: true,
                confidence: 99,
            })
        }
    }

    #[tokio::test]
    async fn verify_produces_one_result() {
        let executor = VerificationExecutor::new(
            Arc::new(CatalogAnalyzer::new()),
            Duration::ZERO,
            Duration::from_secs(30),
        );

        let result = executor.verify(&artifact()).await.unwrap();
        assert!((0.0..=100.0).contains(&result.confidence));
        assert!(result.is_consistent());
    }

    #[tokio::test]
    async fn analyzer_failure_becomes_processing_failed() {
        let executor = VerificationExecutor::new(
            Arc::new(FailingAnalyzer),
            Duration::ZERO,
            Duration::from_secs(30),
        );

        let err = executor.verify(&artifact()).await.unwrap_err();
        assert!(matches!(err, AppError::ProcessingFailed(_)));
    }

    #[tokio::test]
    async fn contradictory_result_is_downgraded() {
        let executor = VerificationExecutor::new(
            Arc::new(ContradictoryAnalyzer),
            Duration::ZERO,
            Duration::from_secs(30),
        );

        let result = executor.verify(&artifact()).await.unwrap();
        assert!(!result.is_valid);
        assert!(result.is_consistent());
    }

    #[tokio::test(start_paused = true)]
    async fn exceeded_latency_bound_times_out() {
        let executor = VerificationExecutor::new(
            Arc::new(CatalogAnalyzer::new()),
            Duration::from_secs(60),
            Duration::from_secs(30),
        );

        let err = executor.verify(&artifact()).await.unwrap_err();
        assert!(matches!(err, AppError::ProcessingTimeout { limit_secs: 30 }));
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_delay_does_not_block_concurrent_verifications() {
        let executor = Arc::new(VerificationExecutor::new(
            Arc::new(CatalogAnalyzer::new()),
            Duration::from_secs(2),
            Duration::from_secs(30),
        ));

        let start = tokio::time::Instant::now();
        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let executor = executor.clone();
                tokio::spawn(async move { executor.verify(&artifact()).await })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        // four concurrent verifications take one delay, not four
        assert!(start.elapsed() < Duration::from_secs(3));
    }
}
