//! Document analysis seam
//!
//! The `Analyzer` trait is the boundary behind which a real fraud-detection
//! engine plugs in. The shipped `CatalogAnalyzer` stands in for it: it picks
//! uniformly at random from a fixed catalog of three canonical outcomes and
//! synthesizes batch screenings, preserving the result contract so a real
//! analyzer can be substituted without touching the gateway, executors, or
//! reaper.

use async_trait::async_trait;
use rand::Rng;

use certguard_core::models::{UploadedArtifact, ValidationChecks, VerificationResult};

/// Analysis errors, converted to `ProcessingFailed` by the executors.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("Analysis failed: {0}")]
    Failed(String),
}

/// Fast per-file outcome used by batch submissions.
#[derive(Debug, Clone, Copy)]
pub struct Screening {
    pub is_valid: bool,
    /// Integer confidence in [60, 100].
    pub confidence: u8,
}

/// Pluggable document analyzer.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Full analysis of one admitted artifact.
    async fn analyze(&self, artifact: &UploadedArtifact)
        -> Result<VerificationResult, AnalyzerError>;

    /// Lightweight screening of one artifact within a batch. Coarser than
    /// `analyze`; per-file outcomes are independent of each other.
    async fn screen(&self, artifact: &UploadedArtifact) -> Result<Screening, AnalyzerError>;
}

/// Reference analyzer: random selection from a fixed three-entry catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogAnalyzer;

impl CatalogAnalyzer {
    pub fn new() -> Self {
        CatalogAnalyzer
    }

    /// The three canonical outcomes: a clean valid certificate, a heavily
    /// flagged invalid one, and a valid one with minor irregularities.
    pub fn catalog() -> Vec<VerificationResult> {
        vec![
            VerificationResult {
                is_valid: true,
                confidence: 95.7,
                institution_name: "Stanford University".to_string(),
                student_name: "John Doe".to_string(),
                degree: "Bachelor of Science in Computer Science".to_string(),
                graduation_date: "June 15, 2023".to_string(),
                issue_date: "June 20, 2023".to_string(),
                certificate_id: "STU-2023-CS-4521".to_string(),
                risks: vec![],
                validation_checks: ValidationChecks {
                    signature_verified: true,
                    seal_authentic: true,
                    format_valid: true,
                    database_match: true,
                    tampering_detected: false,
                },
            },
            VerificationResult {
                is_valid: false,
                confidence: 23.4,
                institution_name: "Unknown Institution".to_string(),
                student_name: "Detected Name".to_string(),
                degree: "Suspicious Certificate".to_string(),
                graduation_date: "Invalid Date".to_string(),
                issue_date: "Invalid Date".to_string(),
                certificate_id: "INVALID".to_string(),
                risks: vec![
                    "Forged signature detected".to_string(),
                    "Invalid seal pattern".to_string(),
                    "Date inconsistencies".to_string(),
                ],
                validation_checks: ValidationChecks {
                    signature_verified: false,
                    seal_authentic: false,
                    format_valid: true,
                    database_match: false,
                    tampering_detected: true,
                },
            },
            VerificationResult {
                is_valid: true,
                confidence: 88.2,
                institution_name: "MIT".to_string(),
                student_name: "Jane Smith".to_string(),
                degree: "Master of Science in Electrical Engineering".to_string(),
                graduation_date: "May 20, 2022".to_string(),
                issue_date: "May 25, 2022".to_string(),
                certificate_id: "MIT-2022-EE-7891".to_string(),
                risks: vec!["Minor formatting irregularities".to_string()],
                validation_checks: ValidationChecks {
                    signature_verified: true,
                    seal_authentic: true,
                    format_valid: true,
                    database_match: true,
                    tampering_detected: false,
                },
            },
        ]
    }
}

#[async_trait]
impl Analyzer for CatalogAnalyzer {
    async fn analyze(
        &self,
        artifact: &UploadedArtifact,
    ) -> Result<VerificationResult, AnalyzerError> {
        let mut catalog = Self::catalog();
        let index = rand::rng().random_range(0..catalog.len());

        tracing::debug!(
            artifact_id = %artifact.id,
            catalog_index = index,
            "Catalog analyzer selected outcome"
        );

        Ok(catalog.swap_remove(index))
    }

    async fn screen(&self, _artifact: &UploadedArtifact) -> Result<Screening, AnalyzerError> {
        let mut rng = rand::rng();
        Ok(Screening {
            is_valid: rng.random_bool(0.8),
            confidence: rng.random_range(60..=100),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn catalog_has_three_consistent_entries() {
        let catalog = CatalogAnalyzer::catalog();
        assert_eq!(catalog.len(), 3);
        for entry in &catalog {
            assert!(entry.is_consistent());
            assert!((0.0..=100.0).contains(&entry.confidence));
        }
        // one heavily flagged invalid entry
        assert_eq!(catalog.iter().filter(|r| !r.is_valid).count(), 1);
        // one valid entry with minor irregularities
        assert_eq!(
            catalog
                .iter()
                .filter(|r| r.is_valid && !r.risks.is_empty())
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn analyze_returns_a_catalog_outcome() {
        let analyzer = CatalogAnalyzer::new();
        let catalog = CatalogAnalyzer::catalog();

        for _ in 0..20 {
            let result = analyzer.analyze(&artifact()).await.unwrap();
            assert!(catalog
                .iter()
                .any(|entry| entry.certificate_id == result.certificate_id));
            assert!(result.is_consistent());
        }
    }

    #[tokio::test]
    async fn screen_confidence_stays_in_range() {
        let analyzer = CatalogAnalyzer::new();
        for _ in 0..50 {
            let screening = analyzer.screen(&artifact()).await.unwrap();
            assert!((60..=100).contains(&screening.confidence));
        }
    }
}
