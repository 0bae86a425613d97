//! Upload gateway
//!
//! Validates and admits incoming files into the artifact store. A file that
//! fails validation is rejected before any bytes are persisted; a batch that
//! exceeds the count cap is rejected before any of its files are admitted.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use certguard_core::models::UploadedArtifact;
use certguard_core::{sanitize_filename, AppError, Config, UploadValidator};
use certguard_storage::{keys, ArtifactStore};

/// Limits and allow-lists injected into the gateway at construction.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub max_file_size_bytes: usize,
    pub max_batch_files: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
}

impl From<&Config> for GatewayConfig {
    fn from(config: &Config) -> Self {
        GatewayConfig {
            max_file_size_bytes: config.max_file_size_bytes,
            max_batch_files: config.max_batch_files,
            allowed_extensions: config.allowed_extensions.clone(),
            allowed_content_types: config.allowed_content_types.clone(),
        }
    }
}

/// One incoming file as extracted from the request body, not yet validated.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub data: Vec<u8>,
    pub original_name: String,
    pub content_type: String,
}

/// Validates and admits uploads into the artifact store.
pub struct UploadGateway {
    storage: Arc<dyn ArtifactStore>,
    validator: UploadValidator,
    max_batch_files: usize,
}

impl UploadGateway {
    pub fn new(storage: Arc<dyn ArtifactStore>, config: GatewayConfig) -> Self {
        let validator = UploadValidator::new(
            config.max_file_size_bytes,
            config.allowed_extensions,
            config.allowed_content_types,
        );
        UploadGateway {
            storage,
            validator,
            max_batch_files: config.max_batch_files,
        }
    }

    /// Validate one file and persist it, producing an admitted artifact.
    pub async fn admit(&self, file: IncomingFile) -> Result<UploadedArtifact, AppError> {
        let extension =
            self.validator
                .validate_all(&file.original_name, &file.content_type, file.data.len())?;
        self.persist(file, extension).await
    }

    /// Validate and admit an ordered batch of files.
    ///
    /// The count cap and every file's validation are checked up front, so a
    /// rejected batch admits nothing.
    pub async fn admit_batch(
        &self,
        files: Vec<IncomingFile>,
    ) -> Result<Vec<UploadedArtifact>, AppError> {
        if files.is_empty() {
            return Err(AppError::NoFileProvided);
        }
        if files.len() > self.max_batch_files {
            return Err(AppError::TooManyFiles {
                count: files.len(),
                max: self.max_batch_files,
            });
        }

        let mut extensions = Vec::with_capacity(files.len());
        for file in &files {
            extensions.push(self.validator.validate_all(
                &file.original_name,
                &file.content_type,
                file.data.len(),
            )?);
        }

        let mut artifacts: Vec<UploadedArtifact> = Vec::with_capacity(files.len());
        for (file, extension) in files.into_iter().zip(extensions) {
            match self.persist(file, extension).await {
                Ok(artifact) => artifacts.push(artifact),
                Err(e) => {
                    // Storage failed mid-batch: unwind what was already admitted.
                    for admitted in &artifacts {
                        if let Err(cleanup_err) =
                            self.storage.delete(&admitted.storage_key).await
                        {
                            tracing::warn!(
                                error = %cleanup_err,
                                storage_key = %admitted.storage_key,
                                "Failed to clean up artifact after batch admission failure"
                            );
                        }
                    }
                    return Err(e);
                }
            }
        }

        Ok(artifacts)
    }

    async fn persist(
        &self,
        file: IncomingFile,
        extension: String,
    ) -> Result<UploadedArtifact, AppError> {
        let id = Uuid::new_v4();
        let admitted_at = Utc::now();
        let sanitized_name = sanitize_filename(&file.original_name)?;
        let storage_key = keys::artifact_key(admitted_at, id, &sanitized_name);
        let size_bytes = file.data.len() as i64;

        self.storage
            .put(&storage_key, file.data)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, artifact_id = %id, "Failed to persist artifact");
                AppError::Storage(e.to_string())
            })?;

        tracing::info!(
            artifact_id = %id,
            original_name = %sanitized_name,
            storage_key = %storage_key,
            size_bytes = size_bytes,
            "Artifact admitted"
        );

        Ok(UploadedArtifact {
            id,
            original_name: file.original_name,
            storage_key,
            size_bytes,
            content_type: file.content_type,
            extension,
            admitted_at,
        })
    }
}
