//! Common utilities for file upload handlers

use axum::extract::Multipart;
use certguard_core::AppError;
use certguard_pipeline::IncomingFile;

/// Extract the single file from a multipart form.
///
/// Exactly one field named "certificate" is accepted; a missing field maps to
/// `NoFileProvided` and a duplicate field is rejected.
pub async fn extract_certificate_file(mut multipart: Multipart) -> Result<IncomingFile, AppError> {
    let mut file: Option<IncomingFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "certificate" {
            if file.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'certificate'"
                        .to_string(),
                ));
            }
            file = Some(read_field(field).await?);
        }
    }

    file.ok_or(AppError::NoFileProvided)
}

/// Extract an ordered batch of files from a multipart form.
///
/// All fields named "certificates" are collected in submission order. The
/// batch count cap is enforced downstream by the gateway; an empty form maps
/// to `NoFileProvided` there as well.
pub async fn extract_certificate_files(
    mut multipart: Multipart,
) -> Result<Vec<IncomingFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "certificates" {
            files.push(read_field(field).await?);
        }
    }

    Ok(files)
}

async fn read_field(field: axum::extract::multipart::Field<'_>) -> Result<IncomingFile, AppError> {
    let original_name = field
        .file_name()
        .map(|s: &str| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let content_type = field
        .content_type()
        .map(|s: &str| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

    Ok(IncomingFile {
        data: data.to_vec(),
        original_name,
        content_type,
    })
}
