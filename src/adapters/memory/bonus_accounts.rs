//! In-memory bonus accounts with idempotent reward credits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{AchievementId, DomainError, ErrorCode, UserId};
use crate::domain::loyalty::{BonusAccount, CreditOutcome, RewardCredit, RewardGrant};
use crate::ports::BonusAccountRepository;

#[derive(Debug, Default)]
struct Store {
    accounts: HashMap<UserId, BonusAccount>,
    credits: HashMap<(UserId, AchievementId), RewardCredit>,
}

/// Accounts and credits behind one lock, so a credit and its balance
/// increment are applied together or not at all.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBonusAccounts {
    store: Arc<RwLock<Store>>,
}

impl InMemoryBonusAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account (test setup).
    pub async fn insert_account(&self, account: BonusAccount) {
        let mut store = self.store.write().await;
        store.accounts.insert(account.user_id.clone(), account);
    }

    /// Number of credits recorded for a user (for test assertions).
    pub async fn credit_count_for(&self, user_id: &UserId) -> usize {
        self.store
            .read()
            .await
            .credits
            .keys()
            .filter(|(user, _)| user == user_id)
            .count()
    }
}

#[async_trait]
impl BonusAccountRepository for InMemoryBonusAccounts {
    async fn get_account(&self, user_id: &UserId) -> Result<Option<BonusAccount>, DomainError> {
        Ok(self.store.read().await.accounts.get(user_id).cloned())
    }

    async fn credit_reward(&self, grant: &RewardGrant) -> Result<CreditOutcome, DomainError> {
        let mut store = self.store.write().await;
        let key = (grant.user_id.clone(), grant.achievement_id.clone());
        if store.credits.contains_key(&key) {
            return Ok(CreditOutcome::AlreadyCredited);
        }

        let mut account = store
            .accounts
            .get(&grant.user_id)
            .cloned()
            .unwrap_or_else(|| BonusAccount::empty(grant.user_id.clone()));

        account.balance = account.balance.checked_add(grant.amount).ok_or_else(|| {
            DomainError::new(ErrorCode::BalanceOverflow, "Bonus balance overflow")
                .with_detail("user_id", grant.user_id.to_string())
        })?;
        if grant.counts_toward_level {
            account.lifetime_spend =
                account.lifetime_spend.checked_add(grant.amount).ok_or_else(|| {
                    DomainError::new(ErrorCode::BalanceOverflow, "Lifetime spend overflow")
                        .with_detail("user_id", grant.user_id.to_string())
                })?;
        }

        store.accounts.insert(grant.user_id.clone(), account);
        store.credits.insert(
            key,
            RewardCredit {
                user_id: grant.user_id.clone(),
                achievement_id: grant.achievement_id.clone(),
                amount: grant.amount,
                credited_at: grant.granted_at,
            },
        );
        Ok(CreditOutcome::Credited)
    }

    async fn find_credit(
        &self,
        user_id: &UserId,
        achievement_id: &AchievementId,
    ) -> Result<Option<RewardCredit>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .credits
            .get(&(user_id.clone(), achievement_id.clone()))
            .cloned())
    }
}
