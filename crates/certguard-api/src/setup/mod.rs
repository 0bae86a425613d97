//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod telemetry;

use std::sync::Arc;

use anyhow::Result;
use certguard_core::Config;

use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let state = Arc::new(AppState::new(config.clone()).await?);

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded"
    );

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
