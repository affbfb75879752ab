//! Discount API configuration module.
//!
//! Configuration is layered with the `config` crate:
//!
//! ```text
//! built-in defaults  <  discount-api.toml (optional)  <  DISCOUNT_API_* env vars
//! ```
//!
//! The TOML path can be moved with `DISCOUNT_API_CONFIG`.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Default TOML file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "discount-api.toml";

/// Environment variable naming an alternative TOML file.
pub const CONFIG_PATH_ENV: &str = "DISCOUNT_API_CONFIG";

/// Prefix for per-key environment overrides (`DISCOUNT_API_PORT`, ...).
pub const ENV_PREFIX: &str = "DISCOUNT_API";

/// Discount API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Maximum pooled SQLite connections
    pub max_connections: u32,

    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,

    /// Allow any origin (local development)
    pub cors_permissive: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 8080,
            database_path: "discounts.db".to_string(),
            max_connections: 5,
            log_filter: "info,discount_api=debug".to_string(),
            cors_permissive: true,
        }
    }
}

impl ApiConfig {
    /// Load configuration from the default file location and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load configuration using `path` as the (optional) TOML layer.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let settings = Config::builder()
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_path", defaults.database_path)?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .set_default("log_filter", defaults.log_filter)?
            .set_default("cors_permissive", defaults.cors_permissive)?
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ApiConfig = settings.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }

        if self.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("database_path".to_string()));
        }

        Ok(())
    }

    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_toml(name: &str, contents: &str) -> String {
        let path = env::temp_dir().join(format!("discount-api-{}-{}.toml", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ApiConfig::load_from("/nonexistent/discount-api.toml").unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "discounts.db");
        assert_eq!(config.max_connections, 5);
        assert!(config.cors_permissive);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let path = temp_toml(
            "override",
            "port = 9090\ndatabase_path = \"/tmp/rules.db\"\ncors_permissive = false\n",
        );

        let config = ApiConfig::load_from(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.port, 9090);
        assert_eq!(config.database_path, "/tmp/rules.db");
        assert!(!config.cors_permissive);
        // untouched keys keep their defaults
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_zero_port_rejected() {
        let path = temp_toml("zero-port", "port = 0\n");

        let err = ApiConfig::load_from(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == "port"));
    }

    #[test]
    fn test_validate() {
        let mut config = ApiConfig::default();
        assert!(config.validate().is_ok());

        config.max_connections = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));

        config.max_connections = 1;
        config.database_path = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_listen_addr() {
        let config = ApiConfig::default();
        assert_eq!(config.listen_addr().port(), 8080);
        assert!(config.listen_addr().ip().is_unspecified());
    }
}
