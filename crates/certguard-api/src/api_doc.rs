//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use certguard_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CertGuard API",
        version = "0.1.0",
        description = "Certificate submission and verification API. Accepts PDF and image uploads, runs them through the verification pipeline, and returns structured authenticity results."
    ),
    paths(
        handlers::verify::verify_certificate,
        handlers::bulk_verify::bulk_verify_certificates,
        handlers::health::health_check,
    ),
    components(schemas(
        models::VerificationResult,
        models::ValidationChecks,
        models::BatchResult,
        models::BatchFileResult,
        error::ErrorResponse,
        handlers::health::HealthResponse,
    )),
    tags(
        (name = "verification", description = "Certificate verification endpoints"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
