//! Configuration module
//!
//! Env-var-driven configuration for the verification pipeline and its HTTP
//! surface. All limits that used to be module-level globals in earlier
//! iterations live here and are injected into the components that need them.

use std::env;
use std::time::Duration;

// Defaults
const MAX_FILE_SIZE_MB: usize = 10;
const MAX_BATCH_FILES: usize = 10;
const REAP_GRACE_SECONDS: u64 = 5;
const PROCESSING_DELAY_MS: u64 = 2_000;
const BATCH_DELAY_MS: u64 = 3_000;
const PROCESSING_TIMEOUT_SECONDS: u64 = 30;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Root directory of the transient artifact store.
    pub upload_dir: String,
    pub max_file_size_bytes: usize,
    pub max_batch_files: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
    /// Delay between result delivery and artifact deletion.
    pub reap_grace_seconds: u64,
    /// Simulated single-document analysis latency.
    pub processing_delay_ms: u64,
    /// Simulated aggregate batch analysis latency.
    pub batch_delay_ms: u64,
    /// Upper bound on executor latency before `ProcessingTimeout`.
    pub processing_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "pdf,jpg,jpeg,png".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| "application/pdf,image/jpeg,image/png".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            max_batch_files: env::var("MAX_BATCH_FILES")
                .unwrap_or_else(|_| MAX_BATCH_FILES.to_string())
                .parse()
                .unwrap_or(MAX_BATCH_FILES),
            allowed_extensions,
            allowed_content_types,
            reap_grace_seconds: env::var("REAP_GRACE_SECONDS")
                .unwrap_or_else(|_| REAP_GRACE_SECONDS.to_string())
                .parse()
                .unwrap_or(REAP_GRACE_SECONDS),
            processing_delay_ms: env::var("PROCESSING_DELAY_MS")
                .unwrap_or_else(|_| PROCESSING_DELAY_MS.to_string())
                .parse()
                .unwrap_or(PROCESSING_DELAY_MS),
            batch_delay_ms: env::var("BATCH_DELAY_MS")
                .unwrap_or_else(|_| BATCH_DELAY_MS.to_string())
                .parse()
                .unwrap_or(BATCH_DELAY_MS),
            processing_timeout_seconds: env::var("PROCESSING_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| PROCESSING_TIMEOUT_SECONDS.to_string())
                .parse()
                .unwrap_or(PROCESSING_TIMEOUT_SECONDS),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn reap_grace(&self) -> Duration {
        Duration::from_secs(self.reap_grace_seconds)
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn processing_timeout(&self) -> Duration {
        Duration::from_secs(self.processing_timeout_seconds)
    }
}

impl Default for Config {
    /// Reference defaults, independent of the environment. Used by tests.
    fn default() -> Self {
        Config {
            server_port: 3001,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            upload_dir: "uploads".to_string(),
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            max_batch_files: MAX_BATCH_FILES,
            allowed_extensions: ["pdf", "jpg", "jpeg", "png"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_content_types: ["application/pdf", "image/jpeg", "image/png"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            reap_grace_seconds: REAP_GRACE_SECONDS,
            processing_delay_ms: PROCESSING_DELAY_MS,
            batch_delay_ms: BATCH_DELAY_MS,
            processing_timeout_seconds: PROCESSING_TIMEOUT_SECONDS,
        }
    }
}
