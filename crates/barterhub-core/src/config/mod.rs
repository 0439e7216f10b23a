//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod email;
pub mod logging;
pub mod swap;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::email::{EmailConfig, EmailProvider};
pub use self::logging::LoggingConfig;
pub use self::swap::SwapConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Outbound email settings.
    #[serde(default)]
    pub email: EmailConfig,
    /// Swap workflow settings.
    #[serde(default)]
    pub swap: SwapConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `BARTERHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BARTERHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.database.provider == StoreProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when database.provider = \"postgres\"",
            ));
        }
        if self.database.statement_timeout_ms == 0 {
            return Err(AppError::configuration(
                "database.statement_timeout_ms must be greater than zero",
            ));
        }
        if self.email.provider == EmailProvider::Smtp && self.email.smtp_host.is_empty() {
            return Err(AppError::configuration(
                "email.smtp_host is required when email.provider = \"smtp\"",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config
    }

    #[test]
    fn test_defaults_are_valid_for_memory_store() {
        assert!(memory_config().validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_url() {
        let config = AppConfig::default();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_zero_statement_timeout_rejected() {
        let mut config = memory_config();
        config.database.statement_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_money_offers_do_not_mark_swapped_by_default() {
        assert!(!AppConfig::default().swap.money_offer_marks_swapped);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let raw = r#"
            [database]
            provider = "memory"

            [swap]
            money_offer_marks_swapped = true
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .expect("build")
            .try_deserialize()
            .expect("deserialize");

        assert_eq!(config.database.provider, StoreProvider::Memory);
        assert!(config.swap.money_offer_marks_swapped);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.email.provider, EmailProvider::Log);
    }
}
