//! Artifact reaper
//!
//! Deletes an artifact's storage entry a fixed grace period after its result
//! has been delivered, regardless of client behavior afterward. Scheduling is
//! detached from the request/response cycle, and deletion failures are
//! absorbed (logged, never surfaced to any caller).

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use certguard_core::models::UploadedArtifact;
use certguard_storage::{ArtifactStore, StorageError};

/// Handle to a scheduled reap. Owned by the artifact's lifecycle record;
/// dropping it does not cancel the reap.
#[derive(Debug)]
pub struct ReapHandle {
    handle: JoinHandle<()>,
}

impl ReapHandle {
    /// Cancel the scheduled deletion. Tests and shutdown paths only.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the reap task to complete.
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

pub struct ArtifactReaper {
    storage: Arc<dyn ArtifactStore>,
    grace: Duration,
}

impl ArtifactReaper {
    pub fn new(storage: Arc<dyn ArtifactStore>, grace: Duration) -> Self {
        ArtifactReaper { storage, grace }
    }

    /// Schedule deletion of an artifact once its result is being returned.
    ///
    /// Consumes the artifact record, so each artifact can be scheduled at most once,
    /// by exactly one executor path. The grace period is measured from
    /// scheduling, not from admission.
    pub fn schedule(&self, artifact: UploadedArtifact) -> ReapHandle {
        let storage = self.storage.clone();
        let grace = self.grace;

        tracing::debug!(
            artifact_id = %artifact.id,
            storage_key = %artifact.storage_key,
            grace_secs = grace.as_secs_f64(),
            "Reap scheduled"
        );

        let handle = tokio::spawn(async move {
            tokio::time::sleep(grace).await;

            match storage.delete(&artifact.storage_key).await {
                Ok(()) => {
                    tracing::debug!(
                        artifact_id = %artifact.id,
                        storage_key = %artifact.storage_key,
                        "Artifact reaped"
                    );
                }
                Err(StorageError::NotFound(_)) => {
                    tracing::warn!(
                        artifact_id = %artifact.id,
                        storage_key = %artifact.storage_key,
                        "Artifact already gone before reaping"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        artifact_id = %artifact.id,
                        storage_key = %artifact.storage_key,
                        "Failed to reap artifact"
                    );
                }
            }
        });

        ReapHandle { handle }
    }
}
