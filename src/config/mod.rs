//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `CLASSROOM` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use classroom_phases::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_BYTES};
pub use database::{DatabaseConfig, StorageBackend};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend and PostgreSQL pool settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Bearer token validation
    pub auth: AuthConfig,

    /// Insert the "Math" demo course at start-up
    #[serde(default)]
    pub seed_demo_course: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CLASSROOM` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `CLASSROOM__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CLASSROOM__DATABASE__BACKEND=postgres` -> `database.backend`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLASSROOM")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CLASSROOM__AUTH__JWT_SECRET",
        "CLASSROOM__SERVER__PORT",
        "CLASSROOM__SERVER__ENVIRONMENT",
        "CLASSROOM__DATABASE__BACKEND",
        "CLASSROOM__DATABASE__URL",
        "CLASSROOM__SEED_DEMO_COURSE",
    ];

    fn set_minimal_env() {
        env::set_var("CLASSROOM__AUTH__JWT_SECRET", "test-secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert!(!config.seed_demo_course);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn test_server_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CLASSROOM__SERVER__PORT", "3000");
        env::set_var("CLASSROOM__SEED_DEMO_COURSE", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.seed_demo_course);
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CLASSROOM__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_BYTES))
        );
    }

    #[test]
    fn test_postgres_backend_requires_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CLASSROOM__DATABASE__BACKEND", "postgres");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.backend, StorageBackend::Postgres);
        assert!(config.validate().is_err());
    }
}
