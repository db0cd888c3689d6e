use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Defines the supported completion providers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAI,
}

impl Provider {
    fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => promptgate_core::gemini::DEFAULT_MODEL,
            Provider::OpenAI => "gpt-4o",
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub provider: Provider,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_api_base: String,
    pub model: String,
    pub provider_timeout: Duration,
    pub debug: bool,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address = match std::env::var("BIND_ADDRESS") {
            Ok(addr) => addr
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?,
            Err(_) => {
                let port_str = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
                let port = port_str.parse::<u16>().map_err(|e| {
                    ConfigError::InvalidValue("PORT".to_string(), e.to_string())
                })?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let provider_str =
            std::env::var("COMPLETION_PROVIDER").unwrap_or_else(|_| "gemini".to_string());
        let provider = match provider_str.to_lowercase().as_str() {
            "gemini" => Provider::Gemini,
            "openai" => Provider::OpenAI,
            other => {
                return Err(ConfigError::InvalidValue(
                    "COMPLETION_PROVIDER".to_string(),
                    format!("'{}' is not one of 'gemini', 'openai'", other),
                ));
            }
        };

        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok();
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();

        let gemini_api_base = std::env::var("GEMINI_API_BASE")
            .unwrap_or_else(|_| promptgate_core::gemini::DEFAULT_API_BASE.to_string());

        let model = std::env::var("COMPLETION_MODEL")
            .unwrap_or_else(|_| provider.default_model().to_string());

        let timeout_str =
            std::env::var("PROVIDER_TIMEOUT_SECS").unwrap_or_else(|_| "60".to_string());
        let provider_timeout = match timeout_str.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                return Err(ConfigError::InvalidValue(
                    "PROVIDER_TIMEOUT_SECS".to_string(),
                    format!("'{}' is not a positive number of seconds", timeout_str),
                ));
            }
        };

        let debug_str = std::env::var("DEBUG").unwrap_or_else(|_| "false".to_string());
        let debug = match debug_str.to_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => {
                return Err(ConfigError::InvalidValue(
                    "DEBUG".to_string(),
                    format!("'{}' is not a boolean", debug_str),
                ));
            }
        };

        let default_level = if debug { "DEBUG" } else { "INFO" };
        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        match provider {
            Provider::Gemini => {
                if gemini_api_key.is_none() {
                    return Err(ConfigError::MissingVar(
                        "GEMINI_API_KEY must be set for 'gemini' provider".to_string(),
                    ));
                }
            }
            Provider::OpenAI => {
                if openai_api_key.is_none() {
                    return Err(ConfigError::MissingVar(
                        "OPENAI_API_KEY must be set for 'openai' provider".to_string(),
                    ));
                }
            }
        }

        Ok(Self {
            bind_address,
            provider,
            gemini_api_key,
            openai_api_key,
            gemini_api_base,
            model,
            provider_timeout,
            debug,
            log_level,
        })
    }
}
