//! In-memory achievement ledger.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::achievement::{InsertOutcome, UserAchievement};
use crate::domain::foundation::{AchievementId, DomainError, UserId};
use crate::ports::AchievementLedger;

/// Ledger held in a map keyed by (user, achievement).
///
/// The entry check and insert happen under one write lock, which gives the
/// same single-winner guarantee as a unique index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAchievementLedger {
    rows: Arc<RwLock<HashMap<(UserId, AchievementId), UserAchievement>>>,
}

impl InMemoryAchievementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds rows directly (test setup).
    pub async fn with_rows(rows: impl IntoIterator<Item = UserAchievement>) -> Self {
        let ledger = Self::new();
        {
            let mut map = ledger.rows.write().await;
            for row in rows {
                map.insert((row.user_id.clone(), row.achievement_id.clone()), row);
            }
        }
        ledger
    }

    /// Number of rows for a user (for test assertions).
    pub async fn count_for(&self, user_id: &UserId) -> usize {
        self.rows
            .read()
            .await
            .keys()
            .filter(|(user, _)| user == user_id)
            .count()
    }
}

#[async_trait]
impl AchievementLedger for InMemoryAchievementLedger {
    async fn try_insert(&self, row: &UserAchievement) -> Result<InsertOutcome, DomainError> {
        let mut rows = self.rows.write().await;
        let key = (row.user_id.clone(), row.achievement_id.clone());
        if rows.contains_key(&key) {
            Ok(InsertOutcome::AlreadyExists)
        } else {
            rows.insert(key, row.clone());
            Ok(InsertOutcome::Inserted)
        }
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserAchievement>, DomainError> {
        let rows = self.rows.read().await;
        let mut found: Vec<UserAchievement> = rows
            .values()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.unlocked_at
                .cmp(&b.unlocked_at)
                .then_with(|| a.achievement_id.cmp(&b.achievement_id))
        });
        Ok(found)
    }
}
