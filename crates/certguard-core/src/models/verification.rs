use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The five named validation checks present in every verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationChecks {
    pub signature_verified: bool,
    pub seal_authentic: bool,
    pub format_valid: bool,
    pub database_match: bool,
    pub tampering_detected: bool,
}

/// Outcome of verifying a single certificate document.
///
/// The string fields are opaque to the pipeline; they are sourced from (or, in
/// the catalog analyzer, in place of) document analysis.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_valid: bool,
    /// Confidence score in [0, 100].
    pub confidence: f64,
    pub institution_name: String,
    pub student_name: String,
    pub degree: String,
    pub graduation_date: String,
    pub issue_date: String,
    pub certificate_id: String,
    /// Ordered, human-readable findings. Empty means no risk found.
    pub risks: Vec<String>,
    pub validation_checks: ValidationChecks,
}

impl VerificationResult {
    /// A valid outcome must never carry a tampering flag.
    pub fn is_consistent(&self) -> bool {
        !(self.is_valid && self.validation_checks.tampering_detected)
    }

    /// Downgrade a contradictory outcome (valid + tampering detected) to
    /// invalid, recording the contradiction as a risk. Returns whether the
    /// result was changed.
    pub fn enforce_consistency(&mut self) -> bool {
        if self.is_consistent() {
            return false;
        }
        self.is_valid = false;
        self.risks
            .push("Tampering detected; result downgraded to invalid".to_string());
        true
    }
}
