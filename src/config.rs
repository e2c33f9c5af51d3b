//! Portal configuration
//!
//! Loaded from a JSON file. Every section and field has a default, so an
//! empty object is a valid configuration. `CAREERVERSE_JWT_SECRET`
//! overrides the session secret from the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::session::DEFAULT_JWT_SECRET;
use crate::auth::SessionConfig;
use crate::http_server::HttpServerConfig;
use crate::observability::LoggingConfig;

pub const JWT_SECRET_ENV: &str = "CAREERVERSE_JWT_SECRET";

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PortalConfig {
    /// Load configuration from file, apply env overrides, validate
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let mut config = Self::from_json(&content)?;
        config.apply_env(std::env::var(JWT_SECRET_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Replace the session secret when the override is set and non-empty
    pub fn apply_env(&mut self, jwt_secret: Option<String>) {
        if let Some(secret) = jwt_secret.filter(|s| !s.is_empty()) {
            self.session.jwt_secret = secret;
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.http.host.is_empty() {
            return Err(ConfigError::Invalid("http.host must not be empty".to_string()));
        }

        if self.session.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid(
                "session.jwt_secret must not be empty".to_string(),
            ));
        }

        if self.session.token_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid(
                "session.token_ttl_minutes must be > 0".to_string(),
            ));
        }

        let cookie = &self.session.cookie_name;
        if cookie.is_empty()
            || !cookie
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Invalid(format!(
                "session.cookie_name '{}' must be non-empty and use only [A-Za-z0-9_-]",
                cookie
            )));
        }

        Ok(())
    }

    /// Whether sessions are signed with the built-in development secret
    ///
    /// Callers warn about this once logging is up.
    pub fn uses_development_secret(&self) -> bool {
        self.session.jwt_secret == DEFAULT_JWT_SECRET
    }
}
