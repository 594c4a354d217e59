//! Server configuration module.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`INVENTORY_*`, `__` for nesting)
//! 2. Config file (`inventory.toml`, or the path in `INVENTORY_CONFIG`)
//! 3. Defaults (this file)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Env var naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "INVENTORY_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "inventory.toml";

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Interface to bind
    pub bind_address: String,

    /// SQLite database file
    pub database_path: PathBuf,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// JWT access token lifetime in seconds
    pub jwt_access_lifetime_secs: i64,

    /// JWT refresh token lifetime in seconds
    pub jwt_refresh_lifetime_secs: i64,

    /// Shared secret for `/functions/v1/*` (the `x-service-key` header)
    pub service_key: String,

    /// Directory holding one sub-directory per storage bucket
    pub storage_root: PathBuf,

    /// Prefix for public object URLs, e.g. `http://localhost:8080`
    pub public_base_url: String,

    /// Confirm sign-up emails immediately
    pub auto_confirm_signups: bool,
}

impl ServerConfig {
    /// Loads configuration from the default file location plus environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Loads configuration with `path` as the (optional) config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data_dir = default_data_dir();

        let settings = Config::builder()
            .set_default("http_port", 8080)?
            .set_default("bind_address", "0.0.0.0")?
            .set_default(
                "database_path",
                data_dir.join("inventory.db").to_string_lossy().to_string(),
            )?
            .set_default("jwt_secret", "inventory-dev-secret-change-in-production")?
            .set_default("jwt_access_lifetime_secs", 3600)? // 1 hour
            .set_default("jwt_refresh_lifetime_secs", 604_800)? // 7 days
            .set_default("service_key", "inventory-dev-service-key")?
            .set_default(
                "storage_root",
                data_dir.join("storage").to_string_lossy().to_string(),
            )?
            .set_default("public_base_url", "http://localhost:8080")?
            .set_default("auto_confirm_signups", true)?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("INVENTORY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingRequired("jwt_secret".to_string()));
        }
        if self.service_key.trim().is_empty() {
            return Err(ConfigError::MissingRequired("service_key".to_string()));
        }
        if self.jwt_access_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue(
                "jwt_access_lifetime_secs".to_string(),
            ));
        }
        if self.jwt_refresh_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue(
                "jwt_refresh_lifetime_secs".to_string(),
            ));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.http_port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("bind_address".to_string()))
    }

    #[cfg(test)]
    pub(crate) fn for_tests(storage_root: &Path) -> Self {
        ServerConfig {
            http_port: 0,
            bind_address: "127.0.0.1".to_string(),
            database_path: PathBuf::from(":memory:"),
            jwt_secret: "test-secret".to_string(),
            jwt_access_lifetime_secs: 3600,
            jwt_refresh_lifetime_secs: 7200,
            service_key: "test-service-key".to_string(),
            storage_root: storage_root.to_path_buf(),
            public_base_url: "http://localhost:8080".to_string(),
            auto_confirm_signups: true,
        }
    }
}

/// Platform data directory, e.g. `~/.local/share/inventory` on Linux.
///
/// Falls back to the working directory when no home directory is known.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "inventorypro", "inventory")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
