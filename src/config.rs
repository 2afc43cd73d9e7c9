//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; there is no hot reload.

use std::env;
use std::path::PathBuf;

/// Default article feed source when `ARTICLES_URL` is not set.
const DEFAULT_ARTICLES_URL: &str = "https://www.runnersworld.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Base directory for per-user record partitions and the credential table
    pub data_dir: PathBuf,
    /// Directory where rendered PDF reports are written
    pub reports_dir: PathBuf,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Article feed source page
    pub articles_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only `JWT_SIGNING_KEY` is required; everything else has a local-dev
    /// default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            data_dir: env::var("RUNLOG_DATA_DIR")
                .unwrap_or_else(|_| "user_data".to_string())
                .into(),
            reports_dir: env::var("RUNLOG_REPORTS_DIR")
                .unwrap_or_else(|_| "reports".to_string())
                .into(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            articles_url: env::var("ARTICLES_URL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_ARTICLES_URL.to_string()),
        })
    }

    /// Default config for tests; stores land in the given directory.
    pub fn test_default(data_dir: PathBuf) -> Self {
        let reports_dir = data_dir.join("reports");
        Self {
            port: 8080,
            data_dir,
            reports_dir,
            frontend_url: "http://localhost:5173".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            articles_url: "http://localhost:9/feed".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
