//! GetLevelProgressHandler - Query handler for cashback level progress.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{MinorUnits, UserId};
use crate::domain::loyalty::{
    cashback_for_purchase, level_progress, LevelProgress, LevelTable, LoyaltyError,
};
use crate::ports::BonusAccountRepository;

/// Query for a user's level progress.
#[derive(Debug, Clone)]
pub struct GetLevelProgressQuery {
    pub user_id: UserId,

    /// Prospective purchase amount to preview cashback for.
    pub preview_purchase: Option<MinorUnits>,
}

impl GetLevelProgressQuery {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            preview_purchase: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelProgressView {
    pub balance: MinorUnits,
    pub progress: LevelProgress,

    /// Cashback the previewed purchase would earn at the current level.
    pub preview_cashback: Option<MinorUnits>,
}

/// `None` when the user has no bonus account; the progress widget is hidden.
pub type GetLevelProgressResult = Option<LevelProgressView>;

pub struct GetLevelProgressHandler {
    accounts: Arc<dyn BonusAccountRepository>,
    levels: Arc<LevelTable>,
}

impl GetLevelProgressHandler {
    pub fn new(accounts: Arc<dyn BonusAccountRepository>, levels: Arc<LevelTable>) -> Self {
        Self { accounts, levels }
    }

    pub async fn handle(
        &self,
        query: GetLevelProgressQuery,
    ) -> Result<GetLevelProgressResult, LoyaltyError> {
        let Some(account) = self.accounts.get_account(&query.user_id).await? else {
            tracing::debug!(user_id = %query.user_id, "No bonus account, progress hidden");
            return Ok(None);
        };

        let progress = level_progress(account.lifetime_spend, &self.levels);
        let preview_cashback = query
            .preview_purchase
            .map(|amount| cashback_for_purchase(amount, &progress.level));

        Ok(Some(LevelProgressView {
            balance: account.balance,
            progress,
            preview_cashback,
        }))
    }
}
