//! Server configuration.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: `localhost`)
//! - `PORT`: Server port (default: `8080`)
//! - `TODO_FILE`: Path of the to-do JSON file (default: `todoServer.json`)
//! - `REQUEST_TIMEOUT_SECS`: Request body read deadline in seconds (default: `10`)
//! - `LOG_FORMAT`: `pretty` (default) | `json`

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TODO_FILE: &str = "todoServer.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A variable is set but its value cannot be used.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

// =============================================================================
// Log Format
// =============================================================================

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err("expected 'pretty' or 'json'".to_string()),
        }
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Backing file of the to-do list.
    pub todo_file: PathBuf,
    /// Deadline for receiving a request body.
    pub request_timeout: Duration,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            todo_file: PathBuf::from(DEFAULT_TODO_FILE),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if a variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unset and blank values fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if a variable holds an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let host = read("HOST").unwrap_or(defaults.host);

        let port = match read("PORT") {
            Some(value) => parse_value("PORT", &value)?,
            None => defaults.port,
        };

        let todo_file = read("TODO_FILE").map_or(defaults.todo_file, PathBuf::from);

        let request_timeout = match read("REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                let seconds: u64 = parse_value("REQUEST_TIMEOUT_SECS", &value)?;
                if seconds == 0 {
                    return Err(ConfigurationError::InvalidValue {
                        key: "REQUEST_TIMEOUT_SECS",
                        value,
                        reason: "must be greater than 0".to_string(),
                    });
                }
                Duration::from_secs(seconds)
            }
            None => defaults.request_timeout,
        };

        let log_format = match read("LOG_FORMAT") {
            Some(value) => parse_value("LOG_FORMAT", &value)?,
            None => defaults.log_format,
        };

        Ok(Self {
            host,
            port,
            todo_file,
            request_timeout,
            log_format,
        })
    }

    /// `host:port` string suitable for binding.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigurationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|error: T::Err| ConfigurationError::InvalidValue {
            key,
            value: value.to_string(),
            reason: error.to_string(),
        })
}
