use serde::Deserialize;

use vatlens_extraction::gemini::DEFAULT_MODEL;

/// VatLens runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Gemini API key; the server refuses to start without one
    pub gemini_api_key: Option<String>,
    /// Model identifier sent to the Gemini API
    pub model: String,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            gemini_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("VATLENS_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("VATLENS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            model: std::env::var("VATLENS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
