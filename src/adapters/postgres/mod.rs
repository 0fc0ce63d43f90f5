//! PostgreSQL adapters - Database implementations for the ports.
//!
//! - `PostgresAchievementLedger` - Unlock rows guarded by a unique constraint
//! - `PostgresBonusAccountRepository` - Balances and transactional reward credits
//! - `PostgresProfileReader` - Subscription tier and expiry
//! - `PostgresAchievementCatalog` - Catalog with JSONB rule metadata
//!
//! Schema lives in `migrations/` and is applied with [`run_migrations`].

mod achievement_catalog;
mod achievement_ledger;
mod bonus_account_repository;
mod profile_reader;

pub use achievement_catalog::PostgresAchievementCatalog;
pub use achievement_ledger::PostgresAchievementLedger;
pub use bonus_account_repository::PostgresBonusAccountRepository;
pub use profile_reader::PostgresProfileReader;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Opens a connection pool sized from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(Some(config.idle_timeout()))
        .max_lifetime(Some(config.max_lifetime()))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::database(format!("Failed to connect to database: {}", e)))
}

/// Applies pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))?;
    tracing::info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    const SCHEMA: &str = include_str!("../../../migrations/20250101000000_loyalty.sql");

    fn table(name: &str) -> &'static str {
        let start = SCHEMA
            .find(&format!("CREATE TABLE IF NOT EXISTS {} (", name))
            .unwrap();
        let end = start + SCHEMA[start..].find(");").unwrap();
        &SCHEMA[start..end]
    }

    #[test]
    fn ledger_rows_do_not_depend_on_the_catalog_table() {
        // A YAML catalog leaves `achievements` empty; unlocks must still insert.
        let ledger = table("user_achievements");

        assert!(!ledger.contains("REFERENCES"));
        assert!(ledger.contains("UNIQUE (user_id, achievement_id)"));
    }

    #[test]
    fn reward_credits_are_keyed_by_ledger_row() {
        let credits = table("reward_credits");

        assert!(credits.contains("PRIMARY KEY (user_id, achievement_id)"));
        assert!(credits.contains("REFERENCES user_achievements (user_id, achievement_id)"));
    }
}
