//! Configuration module for the presence backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::llm::GeminiClientConfig;
use crate::presence::calendar::parse_day;
use crate::presence::StatusFallback;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
#[error("invalid {name} value {value:?}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

impl ConfigError {
    fn new(name: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// Status reported for days with no history entry in read views
    pub default_status: StatusFallback,
    /// Fixed "today", for demos and tests
    pub today_override: Option<NaiveDate>,
    /// Gemini settings; `None` when no API key is set
    pub gemini: Option<GeminiClientConfig>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_psk = lookup("PRESENCE_API_PSK").filter(|s| !s.is_empty());

        let db_path = lookup("PRESENCE_DB_PATH")
            .unwrap_or_else(|| "./data/presence.sqlite".to_string())
            .into();

        let raw_addr =
            lookup("PRESENCE_BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::new("PRESENCE_BIND_ADDR", &raw_addr, e.to_string())
            })?;

        let log_level = lookup("PRESENCE_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_format = match lookup("PRESENCE_LOG_FORMAT") {
            None => LogFormat::Pretty,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "" | "pretty" | "text" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::new(
                        "PRESENCE_LOG_FORMAT",
                        &raw,
                        "expected pretty or json",
                    ))
                }
            },
        };

        let default_status = match lookup("PRESENCE_DEFAULT_STATUS") {
            None => StatusFallback::default(),
            Some(raw) => StatusFallback::parse(&raw).ok_or_else(|| {
                ConfigError::new(
                    "PRESENCE_DEFAULT_STATUS",
                    &raw,
                    "expected none, in-office or remote",
                )
            })?,
        };

        let today_override = match lookup("PRESENCE_TODAY").filter(|s| !s.trim().is_empty()) {
            None => None,
            Some(raw) => Some(parse_day(&raw).ok_or_else(|| {
                ConfigError::new("PRESENCE_TODAY", &raw, "expected YYYY-MM-DD")
            })?),
        };

        let gemini = match lookup("PRESENCE_GEMINI_API_KEY")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .filter(|s| !s.is_empty())
        {
            None => None,
            Some(api_key) => {
                let defaults = GeminiClientConfig::default();
                let timeout_secs = match lookup("PRESENCE_LLM_TIMEOUT_SECS") {
                    None => defaults.timeout_secs,
                    Some(raw) => raw.trim().parse().map_err(|_| {
                        ConfigError::new(
                            "PRESENCE_LLM_TIMEOUT_SECS",
                            &raw,
                            "expected a whole number of seconds",
                        )
                    })?,
                };
                Some(GeminiClientConfig {
                    api_key,
                    model: lookup("PRESENCE_GEMINI_MODEL").unwrap_or(defaults.model),
                    endpoint: lookup("PRESENCE_GEMINI_ENDPOINT").unwrap_or(defaults.endpoint),
                    timeout_secs,
                })
            }
        };

        Ok(Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            log_format,
            default_status,
            today_override,
            gemini,
        })
    }
}
