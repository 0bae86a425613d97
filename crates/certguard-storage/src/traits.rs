//! Storage abstraction trait
//!
//! This module defines the ArtifactStore trait that storage backends must
//! implement. The pipeline exclusively owns an artifact's bytes under its
//! storage key until the reaper deletes them.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Artifact store abstraction
///
/// The gateway writes, exactly one executor reads, and the reaper deletes.
/// No two components ever hold a writable handle to the same key at once.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist an artifact's bytes under the given storage key
    async fn put(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read an artifact's bytes by storage key
    async fn read(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete an artifact by storage key.
    /// Returns `NotFound` if the key has no entry, so callers can
    /// distinguish a missing artifact from a delete failure.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if an artifact exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the size in bytes of an artifact, if it exists.
    async fn content_length(&self, storage_key: &str) -> StorageResult<u64>;
}
