//! Configuration loading from the process environment.

use secrecy::SecretString;
use thiserror::Error;

use crate::config::schema::{Config, DEFAULT_ENVIRONMENT, DEFAULT_PORT, DEFAULT_REGION};

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const API_SECRET_KEY: &str = "API_SECRET_KEY";
pub const REGION: &str = "REGION";
pub const ENVIRONMENT: &str = "ENVIRONMENT";
pub const PORT: &str = "PORT";

/// Error type for configuration loading.
///
/// Variants carry variable names only, never values of sensitive variables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("PORT must be a TCP port number, got {0:?}")]
    InvalidPort(String),
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let database_url = get(DATABASE_URL).ok_or(ConfigError::Missing(DATABASE_URL))?;
        let secret_key = get(API_SECRET_KEY).ok_or(ConfigError::Missing(API_SECRET_KEY))?;

        let region = get(REGION).unwrap_or_else(|| {
            tracing::warn!(default = DEFAULT_REGION, "REGION not set, using default");
            DEFAULT_REGION.to_string()
        });

        let environment = get(ENVIRONMENT).unwrap_or_else(|| {
            tracing::warn!(default = DEFAULT_ENVIRONMENT, "ENVIRONMENT not set, using default");
            DEFAULT_ENVIRONMENT.to_string()
        });

        let port = match get(PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            secret_key: SecretString::new(secret_key),
            database_url: Some(SecretString::new(database_url)),
            region,
            environment,
            port,
        })
    }
}
