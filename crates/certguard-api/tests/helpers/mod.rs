//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p certguard-api`.

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use tempfile::TempDir;

use certguard_api::setup::routes;
use certguard_api::state::AppState;
use certguard_core::models::UploadedArtifact;
use certguard_core::Config;
use certguard_pipeline::{Analyzer, AnalyzerError, CatalogAnalyzer, Screening};
use certguard_storage::{ArtifactStore, LocalArtifactStore};

/// Test application: server plus owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    /// Number of files currently held in the artifact store.
    pub fn artifact_count(&self) -> usize {
        let dir = self.temp_dir.path().join("artifacts");
        match std::fs::read_dir(dir) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }

    /// Wait for the reaper to empty the store, up to ~2 seconds.
    pub async fn wait_for_reap(&self) -> bool {
        for _ in 0..40 {
            if self.artifact_count() == 0 {
                return true;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
        false
    }
}

/// Config with zeroed delays so tests run fast. The reap grace defaults to an
/// hour so artifacts observably survive the response; override per test.
pub fn test_config() -> Config {
    Config {
        processing_delay_ms: 0,
        batch_delay_ms: 0,
        reap_grace_seconds: 3600,
        ..Config::default()
    }
}

/// Analyzer with fixed outcomes, for tests that assert exact response bodies.
pub struct StaticAnalyzer;

#[async_trait]
impl Analyzer for StaticAnalyzer {
    async fn analyze(
        &self,
        _artifact: &UploadedArtifact,
    ) -> Result<certguard_core::models::VerificationResult, AnalyzerError> {
        let mut catalog = CatalogAnalyzer::catalog();
        Ok(catalog.remove(0))
    }

    async fn screen(&self, _artifact: &UploadedArtifact) -> Result<Screening, AnalyzerError> {
        Ok(Screening {
            is_valid: true,
            confidence: 90,
        })
    }
}

/// Setup a test app around the given config, with a temp-dir artifact store
/// and the fixed-outcome analyzer.
pub async fn setup_test_app_with(
    mut config: Config,
    analyzer: Arc<dyn Analyzer>,
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    config.upload_dir = temp_dir.path().to_string_lossy().into_owned();

    let storage: Arc<dyn ArtifactStore> = Arc::new(
        LocalArtifactStore::new(temp_dir.path())
            .await
            .expect("Failed to create local artifact store"),
    );

    let state = Arc::new(AppState::with_components(config.clone(), storage, analyzer));

    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp { server, temp_dir }
}

/// Setup a test app with fast delays and the fixed-outcome analyzer.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(test_config(), Arc::new(StaticAnalyzer)).await
}

pub mod fixtures {
    use axum_test::multipart::{MultipartForm, Part};

    /// Minimal bytes that pass the extension/MIME allow-list as a PDF.
    pub fn pdf_bytes() -> Vec<u8> {
        b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<<>>\n%%EOF\n".to_vec()
    }

    pub fn pdf_part(file_name: &str) -> Part {
        Part::bytes(pdf_bytes())
            .file_name(file_name.to_string())
            .mime_type("application/pdf")
    }

    /// Single-file form for the verify endpoint.
    pub fn certificate_form(file_name: &str) -> MultipartForm {
        MultipartForm::new().add_part("certificate", pdf_part(file_name))
    }

    /// Batch form with `count` PDF files named cert-0.pdf, cert-1.pdf, ...
    pub fn batch_form(count: usize) -> MultipartForm {
        let mut form = MultipartForm::new();
        for i in 0..count {
            form = form.add_part("certificates", pdf_part(&format!("cert-{}.pdf", i)));
        }
        form
    }
}
