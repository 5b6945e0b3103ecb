//! Client configuration.
//!
//! Configuration is a small camelCase JSON document naming the signing key,
//! the issuing team, and the target environment, e.g.:
//!
//! ```json
//! { "keyId": "ABC123DEFG", "teamId": "DEF456GHIJ", "environment": "production" }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default per-send deadline in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Which gateway environment to deliver through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development builds and test devices.
    #[default]
    Sandbox,
    /// App Store / TestFlight builds.
    Production,
}

impl Environment {
    /// Gateway hostname for this environment.
    #[must_use]
    pub fn host(self) -> &'static str {
        match self {
            Self::Sandbox => "api.sandbox.push.apple.com",
            Self::Production => "api.push.apple.com",
        }
    }
}

/// Errors loading configuration from disk.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config at {path}: {reason}")]
    Read {
        /// Config file path.
        path: String,
        /// Error description.
        reason: String,
    },
    /// The config file is not valid JSON for this shape.
    #[error("failed to parse config at {path}: {reason}")]
    Parse {
        /// Config file path.
        path: String,
        /// Error description.
        reason: String,
    },
    /// A required field is empty or absent.
    #[error("config is missing required field {field}")]
    MissingField {
        /// Field name as spelled in the JSON document.
        field: &'static str,
    },
    /// The resolved signing key file does not exist.
    #[error("signing key file not found at {path}")]
    KeyFileMissing {
        /// Resolved key file path.
        path: String,
    },
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Developer key ID (10-char alphanumeric).
    pub key_id: String,
    /// Developer team ID (10-char alphanumeric).
    pub team_id: String,
    /// Gateway environment.
    #[serde(default)]
    pub environment: Environment,
    /// Optional explicit path to the `.p8` key file.
    pub key_path: Option<String>,
    /// Per-send deadline in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl ClientConfig {
    /// Config for the given key and team, targeting the sandbox.
    #[must_use]
    pub fn new(key_id: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            team_id: team_id.into(),
            environment: Environment::Sandbox,
            key_path: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Resolve the path to the private key file.
    ///
    /// An explicit `keyPath` wins, with `~` expanded; otherwise the
    /// conventional `AuthKey_{keyId}.p8` in the working directory.
    #[must_use]
    pub fn resolved_key_path(&self) -> PathBuf {
        if let Some(ref path) = self.key_path {
            if let Some(rest) = path.strip_prefix("~/") {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/root".to_string());
                return PathBuf::from(home).join(rest);
            }
            return PathBuf::from(path);
        }
        PathBuf::from(format!("AuthKey_{}.p8", self.key_id))
    }

    /// Gateway hostname for the configured environment.
    #[must_use]
    pub fn gateway_host(&self) -> &'static str {
        self.environment.host()
    }

    /// The per-send deadline.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load and validate configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if config.key_id.is_empty() {
            return Err(ConfigError::MissingField { field: "keyId" });
        }
        if config.team_id.is_empty() {
            return Err(ConfigError::MissingField { field: "teamId" });
        }

        let key_path = config.resolved_key_path();
        if !key_path.exists() {
            return Err(ConfigError::KeyFileMissing {
                path: key_path.display().to_string(),
            });
        }

        debug!(
            key_id = %config.key_id,
            team_id = %config.team_id,
            environment = ?config.environment,
            "client config loaded"
        );

        Ok(config)
    }
}
