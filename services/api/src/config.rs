//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    /// Absent key degrades reply generation instead of aborting startup.
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub reply_model: String,
    pub mood_log_path: PathBuf,
    /// When set and no API key is configured, valid requests get the
    /// rule-based canned reply for their emotion instead of the fixed
    /// unavailable message.
    pub canned_replies: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5001".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost:5432/calmind".to_string());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load API Key and Reply Settings (key is optional) ---
        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        let gemini_api_base = std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| {
            "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
        });
        let reply_model =
            std::env::var("REPLY_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());

        // --- Load Sink Settings ---
        let mood_log_path = std::env::var("MOOD_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/mood_logs.csv"));

        let canned_replies = match std::env::var("CANNED_REPLIES") {
            Err(_) => false,
            Ok(raw) => match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => {
                    return Err(ConfigError::InvalidValue(
                        "CANNED_REPLIES".to_string(),
                        format!("'{}' is not a boolean", other),
                    ))
                }
            },
        };

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            gemini_api_key,
            gemini_api_base,
            reply_model,
            mood_log_path,
            canned_replies,
        })
    }
}
