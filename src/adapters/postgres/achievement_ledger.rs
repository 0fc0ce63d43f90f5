//! PostgreSQL implementation of AchievementLedger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::achievement::{InsertOutcome, UserAchievement};
use crate::domain::foundation::{AchievementId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::AchievementLedger;

/// Ledger backed by `user_achievements`.
///
/// The `(user_id, achievement_id)` unique constraint decides every race:
/// `ON CONFLICT DO NOTHING` reports the loser as zero affected rows.
pub struct PostgresAchievementLedger {
    pool: PgPool,
}

impl PostgresAchievementLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserAchievementRow {
    user_id: String,
    achievement_id: String,
    unlocked_at: DateTime<Utc>,
}

impl TryFrom<UserAchievementRow> for UserAchievement {
    type Error = DomainError;

    fn try_from(row: UserAchievementRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?;
        let achievement_id = AchievementId::new(row.achievement_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid achievement_id: {}", e))
        })?;
        Ok(UserAchievement::new(
            user_id,
            achievement_id,
            Timestamp::from_datetime(row.unlocked_at),
        ))
    }
}

#[async_trait]
impl AchievementLedger for PostgresAchievementLedger {
    async fn try_insert(&self, row: &UserAchievement) -> Result<InsertOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_achievements (user_id, achievement_id, unlocked_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, achievement_id) DO NOTHING
            "#,
        )
        .bind(row.user_id.as_str())
        .bind(row.achievement_id.as_str())
        .bind(row.unlocked_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert unlock: {}", e)))?;

        if result.rows_affected() == 0 {
            tracing::debug!(
                user_id = %row.user_id,
                achievement_id = %row.achievement_id,
                "Unlock row already present"
            );
            Ok(InsertOutcome::AlreadyExists)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserAchievement>, DomainError> {
        let rows: Vec<UserAchievementRow> = sqlx::query_as(
            r#"
            SELECT user_id, achievement_id, unlocked_at
            FROM user_achievements
            WHERE user_id = $1
            ORDER BY unlocked_at ASC, achievement_id ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list unlocks: {}", e)))?;

        rows.into_iter().map(UserAchievement::try_from).collect()
    }
}
