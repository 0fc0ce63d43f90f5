//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `FITNESS_LOYALTY` prefix
//! and `__` between nesting levels.
//!
//! # Example
//!
//! ```no_run
//! use fitness_loyalty::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.telemetry.init_tracing().expect("Failed to install tracing");
//! ```

mod database;
mod error;
mod loyalty;
mod telemetry;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use loyalty::LoyaltyConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root configuration for a host embedding the loyalty engine.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,

    #[serde(default)]
    pub loyalty: LoyaltyConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `FITNESS_LOYALTY__DATABASE__URL=...` -> `database.url`
    /// - `FITNESS_LOYALTY__LOYALTY__REWARDS_COUNT_TOWARD_LEVEL=true`
    /// - `FITNESS_LOYALTY__TELEMETRY__JSON=true`
    ///
    /// A `.env` file is read first when present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FITNESS_LOYALTY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.loyalty.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "FITNESS_LOYALTY__DATABASE__URL",
        "FITNESS_LOYALTY__LOYALTY__REWARDS_COUNT_TOWARD_LEVEL",
        "FITNESS_LOYALTY__LOYALTY__EXPIRY_REMINDER_DAYS",
        "FITNESS_LOYALTY__TELEMETRY__LOG_FILTER",
    ];

    fn set_minimal_env() {
        env::set_var("FITNESS_LOYALTY__DATABASE__URL", "postgresql://test@localhost/fitness");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn loads_from_environment_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/fitness");
        assert!(!config.loyalty.rewards_count_toward_level);
        assert_eq!(config.loyalty.expiry_reminder_days, 7);
        assert_eq!(config.telemetry.log_filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loyalty_policy_is_read_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FITNESS_LOYALTY__LOYALTY__REWARDS_COUNT_TOWARD_LEVEL", "true");
        env::set_var("FITNESS_LOYALTY__LOYALTY__EXPIRY_REMINDER_DAYS", "14");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.loyalty.rewards_count_toward_level);
        assert_eq!(config.loyalty.expiry_reminder_days, 14);
    }

    #[test]
    fn invalid_section_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FITNESS_LOYALTY__TELEMETRY__LOG_FILTER", "fitness_loyalty=loud");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_err());
    }
}
