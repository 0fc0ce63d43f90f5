//! PostgreSQL implementation of ProfileReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::{Profile, SubscriptionTier};
use crate::ports::ProfileReader;

pub struct PostgresProfileReader {
    pool: PgPool,
}

impl PostgresProfileReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    display_name: Option<String>,
    email: Option<String>,
    subscription_tier: String,
    subscription_expires_at: Option<DateTime<Utc>>,
    profile_completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?;
        let tier = SubscriptionTier::from_str(&row.subscription_tier)?;

        Ok(Profile {
            user_id,
            display_name: row.display_name,
            email: row.email,
            subscription_tier: tier,
            subscription_expires_at: row.subscription_expires_at.map(Timestamp::from_datetime),
            profile_completed_at: row.profile_completed_at.map(Timestamp::from_datetime),
        })
    }
}

#[async_trait]
impl ProfileReader for PostgresProfileReader {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT user_id, display_name, email, subscription_tier,
                   subscription_expires_at, profile_completed_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find profile: {}", e)))?;

        row.map(Profile::try_from).transpose()
    }
}
