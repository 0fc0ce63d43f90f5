//! PostgreSQL implementation of BonusAccountRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{
    AchievementId, DomainError, ErrorCode, MinorUnits, Timestamp, UserId,
};
use crate::domain::loyalty::{BonusAccount, CreditOutcome, RewardCredit, RewardGrant};
use crate::ports::BonusAccountRepository;

/// SQLSTATE for `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Bonus accounts in `bonus_accounts`, paid rewards in `reward_credits`.
///
/// A credit is one transaction: the `reward_credits` insert (which claims the
/// (user, achievement) key) and the balance upsert commit together.
pub struct PostgresBonusAccountRepository {
    pool: PgPool,
}

impl PostgresBonusAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BonusAccountRow {
    user_id: String,
    balance: i64,
    lifetime_spend: i64,
}

impl TryFrom<BonusAccountRow> for BonusAccount {
    type Error = DomainError;

    fn try_from(row: BonusAccountRow) -> Result<Self, Self::Error> {
        Ok(BonusAccount {
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            balance: MinorUnits::try_from_i64("balance", row.balance)?,
            lifetime_spend: MinorUnits::try_from_i64("lifetime_spend", row.lifetime_spend)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RewardCreditRow {
    user_id: String,
    achievement_id: String,
    amount: i64,
    credited_at: DateTime<Utc>,
}

impl TryFrom<RewardCreditRow> for RewardCredit {
    type Error = DomainError;

    fn try_from(row: RewardCreditRow) -> Result<Self, Self::Error> {
        Ok(RewardCredit {
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            achievement_id: AchievementId::new(row.achievement_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid achievement_id: {}", e))
            })?,
            amount: MinorUnits::try_from_i64("amount", row.amount)?,
            credited_at: Timestamp::from_datetime(row.credited_at),
        })
    }
}

fn map_credit_error(e: sqlx::Error, grant: &RewardGrant) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) {
            return DomainError::new(ErrorCode::BalanceOverflow, "Bonus balance overflow")
                .with_detail("user_id", grant.user_id.to_string());
        }
    }
    DomainError::database(format!("Failed to credit reward: {}", e))
        .with_detail("user_id", grant.user_id.to_string())
        .with_detail("achievement_id", grant.achievement_id.to_string())
}

#[async_trait]
impl BonusAccountRepository for PostgresBonusAccountRepository {
    async fn get_account(&self, user_id: &UserId) -> Result<Option<BonusAccount>, DomainError> {
        let row: Option<BonusAccountRow> = sqlx::query_as(
            r#"
            SELECT user_id, balance, lifetime_spend
            FROM bonus_accounts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find bonus account: {}", e)))?;

        row.map(BonusAccount::try_from).transpose()
    }

    async fn credit_reward(&self, grant: &RewardGrant) -> Result<CreditOutcome, DomainError> {
        let amount = grant.amount.to_i64("amount")?;
        let spend_increment = if grant.counts_toward_level { amount } else { 0 };

        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::database(format!("Failed to begin transaction: {}", e))
        })?;

        let claimed = sqlx::query(
            r#"
            INSERT INTO reward_credits (user_id, achievement_id, amount, credited_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, achievement_id) DO NOTHING
            "#,
        )
        .bind(grant.user_id.as_str())
        .bind(grant.achievement_id.as_str())
        .bind(amount)
        .bind(grant.granted_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_credit_error(e, grant))?;

        if claimed.rows_affected() == 0 {
            tx.rollback().await.map_err(|e| {
                DomainError::database(format!("Failed to roll back transaction: {}", e))
            })?;
            return Ok(CreditOutcome::AlreadyCredited);
        }

        sqlx::query(
            r#"
            INSERT INTO bonus_accounts (user_id, balance, lifetime_spend, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (user_id) DO UPDATE SET
                balance = bonus_accounts.balance + EXCLUDED.balance,
                lifetime_spend = bonus_accounts.lifetime_spend + EXCLUDED.lifetime_spend,
                updated_at = now()
            "#,
        )
        .bind(grant.user_id.as_str())
        .bind(amount)
        .bind(spend_increment)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_credit_error(e, grant))?;

        tx.commit().await.map_err(|e| {
            DomainError::database(format!("Failed to commit reward credit: {}", e))
        })?;

        Ok(CreditOutcome::Credited)
    }

    async fn find_credit(
        &self,
        user_id: &UserId,
        achievement_id: &AchievementId,
    ) -> Result<Option<RewardCredit>, DomainError> {
        let row: Option<RewardCreditRow> = sqlx::query_as(
            r#"
            SELECT user_id, achievement_id, amount, credited_at
            FROM reward_credits
            WHERE user_id = $1 AND achievement_id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(achievement_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find reward credit: {}", e)))?;

        row.map(RewardCredit::try_from).transpose()
    }
}
