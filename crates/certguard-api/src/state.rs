use std::sync::Arc;

use anyhow::Result;

use certguard_core::Config;
use certguard_pipeline::{
    Analyzer, ArtifactReaper, BatchExecutor, CatalogAnalyzer, GatewayConfig, UploadGateway,
    VerificationExecutor,
};
use certguard_storage::{ArtifactStore, LocalArtifactStore};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn ArtifactStore>,
    pub gateway: Arc<UploadGateway>,
    pub executor: Arc<VerificationExecutor>,
    pub batch_executor: Arc<BatchExecutor>,
    pub reaper: Arc<ArtifactReaper>,
}

impl AppState {
    /// Build the state for production: local artifact store rooted at
    /// `config.upload_dir`, catalog-backed analyzer.
    pub async fn new(config: Config) -> Result<Self> {
        let storage: Arc<dyn ArtifactStore> =
            Arc::new(LocalArtifactStore::new(&config.upload_dir).await?);
        let analyzer: Arc<dyn Analyzer> = Arc::new(CatalogAnalyzer::new());
        Ok(Self::with_components(config, storage, analyzer))
    }

    /// Build the state from pre-constructed components. Used by tests to
    /// inject a temp-dir store and a deterministic analyzer.
    pub fn with_components(
        config: Config,
        storage: Arc<dyn ArtifactStore>,
        analyzer: Arc<dyn Analyzer>,
    ) -> Self {
        let gateway = Arc::new(UploadGateway::new(
            storage.clone(),
            GatewayConfig::from(&config),
        ));
        let executor = Arc::new(VerificationExecutor::new(
            analyzer.clone(),
            config.processing_delay(),
            config.processing_timeout(),
        ));
        let batch_executor = Arc::new(BatchExecutor::new(
            analyzer,
            config.batch_delay(),
            config.processing_timeout(),
            config.max_batch_files,
        ));
        let reaper = Arc::new(ArtifactReaper::new(storage.clone(), config.reap_grace()));

        AppState {
            config,
            storage,
            gateway,
            executor,
            batch_executor,
            reaper,
        }
    }
}
