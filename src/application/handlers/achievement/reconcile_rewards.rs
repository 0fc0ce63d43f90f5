//! ReconcileRewardsHandler - Pays rewards whose credit failed after unlock.
//!
//! Walks the user's ledger rows; any row whose achievement carries a reward
//! but has no recorded credit is credited now. The credit is keyed by the
//! ledger pair, so running this concurrently with evaluation, or repeatedly,
//! never pays twice.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::{AchievementId, MinorUnits, UserId};
use crate::domain::loyalty::{CreditOutcome, LoyaltyError, RewardGrant};
use crate::ports::{AchievementCatalogSource, AchievementLedger, BonusAccountRepository, Clock};

#[derive(Debug, Clone)]
pub struct ReconcileRewardsCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileRewardsResult {
    /// Rewards paid by this run.
    pub credited: Vec<(AchievementId, MinorUnits)>,

    /// Rewards that still could not be paid.
    pub still_pending: Vec<AchievementId>,
}

impl ReconcileRewardsResult {
    pub fn is_settled(&self) -> bool {
        self.still_pending.is_empty()
    }
}

pub struct ReconcileRewardsHandler {
    catalog: Arc<dyn AchievementCatalogSource>,
    ledger: Arc<dyn AchievementLedger>,
    accounts: Arc<dyn BonusAccountRepository>,
    clock: Arc<dyn Clock>,
    rewards_count_toward_level: bool,
}

impl ReconcileRewardsHandler {
    pub fn new(
        catalog: Arc<dyn AchievementCatalogSource>,
        ledger: Arc<dyn AchievementLedger>,
        accounts: Arc<dyn BonusAccountRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            ledger,
            accounts,
            clock,
            rewards_count_toward_level: false,
        }
    }

    pub fn with_rewards_counting_toward_level(mut self, enabled: bool) -> Self {
        self.rewards_count_toward_level = enabled;
        self
    }

    pub async fn handle(
        &self,
        cmd: ReconcileRewardsCommand,
    ) -> Result<ReconcileRewardsResult, LoyaltyError> {
        let catalog = self.catalog.load_catalog().await?;
        let rows = self.ledger.list_for_user(&cmd.user_id).await?;
        let mut result = ReconcileRewardsResult::default();

        for row in rows {
            let Some(amount) = catalog.get(&row.achievement_id).and_then(|a| a.reward()) else {
                continue;
            };
            match self.accounts.find_credit(&cmd.user_id, &row.achievement_id).await {
                Ok(Some(_)) => continue,
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(
                        user_id = %cmd.user_id,
                        achievement_id = %row.achievement_id,
                        error = %e,
                        "Credit lookup failed, reward still pending"
                    );
                    result.still_pending.push(row.achievement_id);
                    continue;
                }
            }

            let grant = RewardGrant {
                user_id: cmd.user_id.clone(),
                achievement_id: row.achievement_id.clone(),
                amount,
                counts_toward_level: self.rewards_count_toward_level,
                granted_at: self.clock.now(),
            };
            match self.accounts.credit_reward(&grant).await {
                Ok(CreditOutcome::Credited) => {
                    tracing::info!(
                        user_id = %cmd.user_id,
                        achievement_id = %row.achievement_id,
                        amount = amount.value(),
                        "Pending reward credited"
                    );
                    result.credited.push((row.achievement_id, amount));
                }
                Ok(CreditOutcome::AlreadyCredited) => {}
                Err(e) => {
                    tracing::error!(
                        user_id = %cmd.user_id,
                        achievement_id = %row.achievement_id,
                        error = %e,
                        "Reward still pending"
                    );
                    result.still_pending.push(row.achievement_id);
                }
            }
        }

        Ok(result)
    }
}
