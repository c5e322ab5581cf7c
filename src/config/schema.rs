//! Configuration schema.

use secrecy::{ExposeSecret, SecretString};

/// Region used when `REGION` is not set.
pub const DEFAULT_REGION: &str = "unknown";

/// Environment used when `ENVIRONMENT` is not set.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Process-wide settings, populated once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret expected in the `X-API-Key` header.
    pub secret_key: SecretString,

    /// Database connection string. Only its presence is ever consulted.
    pub database_url: Option<SecretString>,

    /// Deployment region, selects the simulated latency profile.
    pub region: String,

    /// Deployment environment label (dev, staging, prod, ...).
    pub environment: String,

    /// TCP port the HTTP server listens on.
    pub port: u16,
}

impl Config {
    /// Minimal config for tests and embedding: no database, default labels.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            database_url: None,
            region: DEFAULT_REGION.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            port: DEFAULT_PORT,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(SecretString::new(url.into()));
        self
    }

    /// Whether a database connection string was supplied.
    pub fn database_configured(&self) -> bool {
        self.database_url
            .as_ref()
            .is_some_and(|url| !url.expose_secret().is_empty())
    }
}
