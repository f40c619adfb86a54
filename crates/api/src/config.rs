//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Server configuration.
///
/// Required environment variables (startup fails without them):
/// - `DATABASE_URL` — PostgreSQL connection string
/// - `COUNTRIES_API_URL` — country catalog endpoint
/// - `EXCHANGE_API_URL` — exchange rate endpoint
/// - `ALLOWED_ORIGINS` — comma-separated CORS origins (`*` allows any)
///
/// Optional with defaults:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `SUMMARY_IMAGE_PATH` — summary image location (default: `cache/summary.png`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub countries_api_url: String,
    pub exchange_api_url: String,
    pub allowed_origins: Vec<String>,
    pub summary_image_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: require("DATABASE_URL")?,
            countries_api_url: require("COUNTRIES_API_URL")?,
            exchange_api_url: require("EXCHANGE_API_URL")?,
            allowed_origins: parse_origins(&require("ALLOWED_ORIGINS")?),
            summary_image_path: std::env::var("SUMMARY_IMAGE_PATH")
                .unwrap_or_else(|_| "cache/summary.png".to_string())
                .into(),
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}
