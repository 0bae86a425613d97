use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};

use certguard_core::models::VerificationResult;
use certguard_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_certificate_file;

#[utoipa::path(
    post,
    path = "/api/verify",
    tag = "verification",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Certificate verified", body = VerificationResult),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Verification failed", body = ErrorResponse),
        (status = 504, description = "Verification timed out", body = ErrorResponse)
    )
)]
pub async fn verify_certificate(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<VerificationResult>, HttpAppError> {
    let start = std::time::Instant::now();

    let file = extract_certificate_file(multipart).await?;

    // Admission, verification, and reap scheduling run detached from the
    // request future: a client disconnect drops this handler at the await
    // point, but the admitted artifact still gets its grace-period cleanup.
    let verification = tokio::spawn(async move {
        let artifact = state.gateway.admit(file).await?;

        let outcome = state.executor.verify(&artifact).await;

        if let Ok(result) = &outcome {
            tracing::info!(
                artifact_id = %artifact.id,
                original_name = %artifact.original_name,
                is_valid = result.is_valid,
                confidence = result.confidence,
                duration_ms = start.elapsed().as_millis() as u64,
                "Certificate verified"
            );
        }

        // Failed or timed-out verifications schedule cleanup too, so the
        // artifact never outlives its grace period.
        state.reaper.schedule(artifact);
        outcome
    });

    let result = verification
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))??;

    Ok(Json(result))
}
