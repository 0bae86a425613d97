use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};

use certguard_core::models::BatchResult;
use certguard_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_certificate_files;

#[utoipa::path(
    post,
    path = "/api/bulk-verify",
    tag = "verification",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Batch verified", body = BatchResult),
        (status = 400, description = "Invalid input or too many files", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Verification failed", body = ErrorResponse),
        (status = 504, description = "Verification timed out", body = ErrorResponse)
    )
)]
pub async fn bulk_verify_certificates(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<BatchResult>, HttpAppError> {
    let start = std::time::Instant::now();

    let files = extract_certificate_files(multipart).await?;

    // Detached from the request future: a client disconnect during the
    // aggregate delay must not skip reap scheduling for admitted artifacts.
    let verification = tokio::spawn(async move {
        let artifacts = state.gateway.admit_batch(files).await?;

        let outcome = state.batch_executor.verify_batch(&artifacts).await;

        if let Ok(result) = &outcome {
            tracing::info!(
                total_processed = result.total_processed,
                successful = result.successful,
                failed = result.failed,
                duration_ms = start.elapsed().as_millis() as u64,
                "Batch verified"
            );
        }

        // Each artifact is scheduled exactly once; schedule consumes ownership.
        for artifact in artifacts {
            state.reaper.schedule(artifact);
        }
        outcome
    });

    let result = verification
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))??;

    Ok(Json(result))
}
