//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod database;
pub mod export;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::catalog::{CatalogConfig, ProductDeletePolicy};
pub use self::database::DatabaseConfig;
pub use self::export::ExportConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides, e.g. `BACKOFFICE__DATABASE__URL`.
const ENV_PREFIX: &str = "BACKOFFICE";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Catalog policies.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Spreadsheet export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `BACKOFFICE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_fills_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [database]
            url = "postgres://backoffice@localhost/backoffice"
            "#,
        )
        .expect("minimal config should parse");

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.catalog.product_delete_policy, ProductDeletePolicy::Restrict);
        assert_eq!(config.export.uncategorized_label, "Sonstige");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_cascade_policy_parses() {
        let config = AppConfig::from_toml(
            r#"
            [database]
            url = "postgres://localhost/db"

            [catalog]
            product_delete_policy = "cascade"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.catalog.product_delete_policy, ProductDeletePolicy::Cascade);
    }

    #[test]
    fn test_missing_database_url_is_rejected() {
        let err = AppConfig::from_toml("[server]\nport = 8080\n").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
