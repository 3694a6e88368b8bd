//! # pet-config
//!
//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PETFAMILY_*` prefix, `__` as separator)
//! 2. Deployment env vars `DATABASE_URL`, `DATABASE_AUTH_TOKEN`, `PORT`,
//!    `AFFILIATE_SHEET_URL`
//! 3. Project-level `./petfamily.toml`
//! 4. User-level `~/.config/petfamily/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PETFAMILY_SERVER__PORT` -> `server.port`,
//! `PETFAMILY_AFFILIATE__CACHE_TTL_SECS` -> `affiliate.cache_ttl_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use pet_config::PetConfig;
//!
//! let config = PetConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_address());
//! ```

mod affiliate;
mod database;
mod error;
mod server;

pub use affiliate::{AffiliateConfig, PLACEHOLDER_SHEET_URL};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Unprefixed env vars set by hosting platforms, and the keys they fill.
const DEPLOYMENT_ENV_KEYS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("DATABASE_AUTH_TOKEN", "database.auth_token"),
    ("PORT", "server.port"),
    ("AFFILIATE_SHEET_URL", "affiliate.sheet_url"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PetConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub affiliate: AffiliateConfig,
}

impl PetConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the binary can layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from("petfamily.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Deployment env vars
        figment = figment.merge(Self::deployment_env());

        // Layer 4: Prefixed environment variables (highest priority)
        figment.merge(Env::prefixed("PETFAMILY_").split("__"))
    }

    /// Reject values that would only fail later at bind or request time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "must be between 1 and 65535"));
        }
        if self.server.allowed_origins.is_empty() {
            return Err(invalid("server.allowed_origins", "must list at least one origin"));
        }
        if self.server.allowed_origins.iter().any(|origin| origin == "*") {
            return Err(invalid(
                "server.allowed_origins",
                "wildcard origin cannot be combined with credentials",
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(invalid("server.request_timeout_secs", "must be positive"));
        }
        if self.database.url.is_empty() {
            return Err(invalid("database.url", "must not be empty"));
        }
        if self.affiliate.timeout_secs == 0 {
            return Err(invalid("affiliate.timeout_secs", "must be positive"));
        }
        Ok(())
    }

    fn deployment_env() -> Env {
        let names: Vec<&str> = DEPLOYMENT_ENV_KEYS.iter().map(|(env, _)| *env).collect();
        Env::raw().only(&names).map(|key| {
            DEPLOYMENT_ENV_KEYS
                .iter()
                .find(|(env, _)| key.as_str().eq_ignore_ascii_case(env))
                .map_or_else(|| key.into(), |(_, path)| (*path).into())
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("petfamily").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
