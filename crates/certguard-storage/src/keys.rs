//! Storage key generation for admitted artifacts.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Prefix under which all transient artifacts are stored.
pub const ARTIFACT_PREFIX: &str = "artifacts";

/// Generate a storage key from the admission timestamp, artifact id, and the
/// sanitized original filename. The timestamp keeps keys roughly ordered by
/// admission; the id guarantees uniqueness for concurrent admissions in the
/// same millisecond.
pub fn artifact_key(admitted_at: DateTime<Utc>, id: Uuid, sanitized_name: &str) -> String {
    format!(
        "{}/{}-{}-{}",
        ARTIFACT_PREFIX,
        admitted_at.timestamp_millis(),
        id,
        sanitized_name
    )
}
