use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One admitted file, tracked from admission through processing to deletion.
///
/// Lifecycle: created by the gateway at successful admission, read by exactly
/// one executor, deleted by the reaper exactly once after the grace period.
/// The storage key is exclusively owned by the pipeline until reaped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedArtifact {
    pub id: Uuid,
    /// Client-supplied filename. Untrusted, display-only.
    pub original_name: String,
    /// Location in the artifact store.
    pub storage_key: String,
    pub size_bytes: i64,
    /// MIME type as declared by the client.
    pub content_type: String,
    /// Lowercased file extension.
    pub extension: String,
    pub admitted_at: DateTime<Utc>,
}
