//! CertGuard API Library
//!
//! This crate provides the HTTP handlers, error rendering, and application
//! setup for the certificate verification service.

mod api_doc;
mod handlers;
mod utils;

// Public modules
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use state::AppState;
