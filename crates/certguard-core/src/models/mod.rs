//! Domain models for the verification pipeline.

mod artifact;
mod batch;
mod verification;

pub use artifact::UploadedArtifact;
pub use batch::{BatchFileResult, BatchResult};
pub use verification::{ValidationChecks, VerificationResult};
