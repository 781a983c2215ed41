//! Configuration module for the CampusCircle backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

use crate::models::LenderIdentity;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Plain text or JSON log lines
    pub log_format: LogFormat,
    /// Lender identity used when a request carries none
    pub lender: LenderIdentity,
    /// Start with the mock campus requests
    pub seed: bool,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
    /// Location line shown above the feed
    pub location_label: String,
}

/// A configuration variable that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid {} value: {:?}", self.variable, self.value)
    }
}

impl std::error::Error for ConfigError {}

fn parse_var<T: std::str::FromStr>(variable: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(variable).unwrap_or_else(|_| default.to_string());
    value.trim().parse().map_err(|_| ConfigError { variable, value })
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bind_addr = parse_var("CAMPUS_BIND_ADDR", "127.0.0.1:8080")?;

        let log_level = env::var("CAMPUS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("CAMPUS_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("text") | Err(_) => LogFormat::Text,
            Ok(other) => {
                return Err(ConfigError {
                    variable: "CAMPUS_LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        let lender = LenderIdentity {
            id: env::var("CAMPUS_LENDER_ID").unwrap_or_else(|_| "current-user-id".to_string()),
            display_name: env::var("CAMPUS_LENDER_NAME")
                .unwrap_or_else(|_| "Anonymous".to_string()),
        };

        let seed = parse_var("CAMPUS_SEED", "true")?;

        let max_upload_bytes = parse_var("CAMPUS_MAX_UPLOAD_BYTES", "10485760")?;

        let location_label = env::var("CAMPUS_LOCATION_LABEL")
            .unwrap_or_else(|_| "IIT Delhi Campus • 50m radius".to_string());

        Ok(Self {
            bind_addr,
            log_level,
            log_format,
            lender,
            seed,
            max_upload_bytes,
            location_label,
        })
    }
}
