use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/api";
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Session configuration loaded from environment variables.
/// Every value has a default; only malformed numbers are rejected.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub max_upload_bytes: u64,
    pub history_debounce: Duration,
    pub history_capacity: usize,
    pub request_timeout: Duration,
    pub preferences_dir: PathBuf,
    pub output_dir: PathBuf,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            history_debounce: Duration::from_millis(1000),
            history_capacity: 20,
            request_timeout: Duration::from_secs(120),
            preferences_dir: PathBuf::from(".wizard"),
            output_dir: PathBuf::from("."),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            backend_url: std::env::var("WIZARD_BACKEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            max_upload_bytes: parse_env("WIZARD_MAX_UPLOAD_BYTES")?
                .unwrap_or(defaults.max_upload_bytes),
            history_debounce: parse_env("WIZARD_HISTORY_DEBOUNCE_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.history_debounce),
            history_capacity: parse_env("WIZARD_HISTORY_CAPACITY")?
                .unwrap_or(defaults.history_capacity),
            request_timeout: parse_env("WIZARD_REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            preferences_dir: std::env::var("WIZARD_PREFERENCES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.preferences_dir),
            output_dir: std::env::var("WIZARD_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    /// Joins an endpoint path onto the backend base URL.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.backend_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(None),
    }
}
