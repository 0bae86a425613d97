//! CertGuard Artifact Store
//!
//! Transient blob storage for admitted certificate files. Artifacts live here
//! between admission and either processing-completion cleanup or rejection.
//!
//! **Key format:** `artifacts/{admission-millis}-{artifact-id}-{sanitized-name}`,
//! generated by [`keys::artifact_key`]. The artifact id makes keys collision
//! free even for admissions in the same millisecond.

pub mod keys;
mod local;
mod traits;

pub use local::LocalArtifactStore;
pub use traits::{ArtifactStore, StorageError, StorageResult};
