//! Server configuration
//!
//! Built once at startup from defaults overridden by environment variables,
//! then shared read-only through `AppState`.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

const DEV_SECRET_KEY: &str = "dev-secret-change-me";

/// Form tokens live at most 30 days.
pub const MAX_CSRF_TTL_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_address: String,
    pub database_path: String,
    pub secret_key: String,
    pub static_dir: String,
    pub csrf_enabled: bool,
    pub csrf_ttl_secs: i64,
}

impl Config {
    /// Load from `BIND_ADDRESS`, `DATABASE_PATH`, `SECRET_KEY`, `STATIC_DIR`,
    /// `CSRF_ENABLED` and `CSRF_TTL_SECS`.
    pub fn load() -> Result<Self> {
        let config: Config = Self::builder()?
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Invalid configuration")?;

        if config.secret_key == DEV_SECRET_KEY {
            warn!("SECRET_KEY not set, using default (insecure for production)");
        }
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_CSRF_TTL_SECS).contains(&self.csrf_ttl_secs) {
            anyhow::bail!(
                "CSRF_TTL_SECS must be between 1 and {}, got {}",
                MAX_CSRF_TTL_SECS,
                self.csrf_ttl_secs
            );
        }
        Ok(())
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(config::Config::builder()
            .set_default("bind_address", "127.0.0.1:5000")?
            .set_default("database_path", "cafes.db")?
            .set_default("secret_key", DEV_SECRET_KEY)?
            .set_default("static_dir", "static")?
            .set_default("csrf_enabled", true)?
            .set_default("csrf_ttl_secs", 3600_i64)?)
    }

    /// Configuration for tests: in-memory friendly, fixed key.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            bind_address: "127.0.0.1:0".to_string(),
            database_path: ":memory:".to_string(),
            secret_key: "test-secret".to_string(),
            static_dir: "static".to_string(),
            csrf_enabled: true,
            csrf_ttl_secs: 3600,
        }
    }
}
