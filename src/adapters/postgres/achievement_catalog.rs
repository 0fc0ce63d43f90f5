//! PostgreSQL implementation of AchievementCatalogSource.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::achievement::{Achievement, AchievementCatalog, UnlockRule};
use crate::domain::foundation::{AchievementId, DomainError, ErrorCode, MinorUnits};
use crate::ports::AchievementCatalogSource;

/// Reads the whole `achievements` table on every call.
///
/// Rule metadata is stored as JSONB and interpreted leniently: rows whose
/// rule this build does not understand load as [`UnlockRule::Unsupported`].
pub struct PostgresAchievementCatalog {
    pool: PgPool,
}

impl PostgresAchievementCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AchievementRow {
    id: String,
    title: String,
    description: String,
    category: String,
    is_secret: bool,
    reward_amount: Option<i64>,
    rule: serde_json::Value,
    sort_order: i32,
}

impl TryFrom<AchievementRow> for Achievement {
    type Error = DomainError;

    fn try_from(row: AchievementRow) -> Result<Self, Self::Error> {
        let id = AchievementId::new(row.id).map_err(|e| {
            DomainError::new(ErrorCode::InvalidCatalog, format!("Invalid achievement id: {}", e))
        })?;
        let reward_amount = row
            .reward_amount
            .map(|amount| MinorUnits::try_from_i64("reward_amount", amount))
            .transpose()?;

        Ok(Achievement {
            rule: UnlockRule::from_metadata(&row.rule),
            id,
            title: row.title,
            description: row.description,
            category: row.category,
            is_secret: row.is_secret,
            reward_amount,
            sort_order: row.sort_order,
        })
    }
}

#[async_trait]
impl AchievementCatalogSource for PostgresAchievementCatalog {
    async fn load_catalog(&self) -> Result<AchievementCatalog, DomainError> {
        let rows: Vec<AchievementRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, category, is_secret,
                   reward_amount, rule, sort_order
            FROM achievements
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::CatalogUnavailable,
                format!("Failed to load achievements: {}", e),
            )
        })?;

        let entries = rows
            .into_iter()
            .map(Achievement::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        AchievementCatalog::new(entries).map_err(|e| {
            DomainError::new(ErrorCode::InvalidCatalog, format!("Invalid catalog: {}", e))
        })
    }
}
