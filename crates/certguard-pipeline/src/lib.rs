//! CertGuard Verification Pipeline
//!
//! The core of the document submission and verification flow:
//! gateway (validate and admit uploads), executors (turn admitted artifacts
//! into results), and reaper (delete artifacts after their grace period).
//!
//! Control flow: client -> `UploadGateway` -> `VerificationExecutor` or
//! `BatchExecutor` -> response; the `ArtifactReaper` runs detached from the
//! request/response cycle.

mod analyzer;
mod batch;
mod executor;
mod gateway;
mod reaper;

pub use analyzer::{Analyzer, AnalyzerError, CatalogAnalyzer, Screening};
pub use batch::BatchExecutor;
pub use executor::VerificationExecutor;
pub use gateway::{GatewayConfig, IncomingFile, UploadGateway};
pub use reaper::{ArtifactReaper, ReapHandle};
