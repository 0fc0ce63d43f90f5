//! EvaluateAndCommitHandler - Command handler that unlocks newly earned
//! achievements and pays their rewards.
//!
//! # Flow
//!
//! For every achievement the evaluator reports:
//!
//! 1. `Locked -> Unlocking`
//! 2. Insert the ledger row. The unique insert is the only decision point: a
//!    concurrent evaluation that already inserted wins, and this one stops.
//! 3. Row inserted: `Unlocking -> Unlocked`, then credit the reward keyed by
//!    the same (user, achievement) pair.
//! 4. Insert failed: `Unlocking -> Locked`; the next evaluation retries.
//!
//! A failed credit never rolls back the unlock. The reward is reported as
//! pending and [`super::ReconcileRewardsHandler`] pays it later.

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::achievement::{
    evaluate, Achievement, InsertOutcome, LoyaltyEvent, UnlockStatus, UserAchievement,
};
use crate::domain::foundation::{AchievementId, StateMachine, Timestamp, UserId};
use crate::domain::loyalty::{LoyaltyError, RewardGrant, RewardStatus};
use crate::ports::{
    AchievementCatalogSource, AchievementLedger, BonusAccountRepository, Clock, UserStateReader,
};

/// Command to evaluate a user after something happened.
#[derive(Debug, Clone)]
pub struct EvaluateAndCommitCommand {
    pub user_id: UserId,
    pub event: LoyaltyEvent,
}

/// An achievement this call unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockedAchievement {
    pub achievement_id: AchievementId,
    pub title: String,
    pub unlocked_at: Timestamp,
    pub reward: RewardStatus,
}

/// An achievement that was earned but could not be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockFailure {
    pub achievement_id: AchievementId,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluateAndCommitResult {
    pub event: LoyaltyEvent,

    /// Newly unlocked by this call, in catalog order.
    pub unlocked: Vec<UnlockedAchievement>,

    /// Earned but not recorded; a later evaluation picks them up again.
    pub failures: Vec<UnlockFailure>,
}

impl EvaluateAndCommitResult {
    pub fn has_pending_rewards(&self) -> bool {
        self.unlocked.iter().any(|u| u.reward.is_pending())
    }

    pub fn unlocked_ids(&self) -> Vec<&AchievementId> {
        self.unlocked.iter().map(|u| &u.achievement_id).collect()
    }
}

/// Outcome of one achievement's pass through the unlock lifecycle.
enum Commit {
    Unlocked(UnlockedAchievement),
    LostRace,
    Failed(UnlockFailure),
}

pub struct EvaluateAndCommitHandler {
    catalog: Arc<dyn AchievementCatalogSource>,
    ledger: Arc<dyn AchievementLedger>,
    user_states: Arc<dyn UserStateReader>,
    accounts: Arc<dyn BonusAccountRepository>,
    clock: Arc<dyn Clock>,
    rewards_count_toward_level: bool,
}

impl EvaluateAndCommitHandler {
    pub fn new(
        catalog: Arc<dyn AchievementCatalogSource>,
        ledger: Arc<dyn AchievementLedger>,
        user_states: Arc<dyn UserStateReader>,
        accounts: Arc<dyn BonusAccountRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            ledger,
            user_states,
            accounts,
            clock,
            rewards_count_toward_level: false,
        }
    }

    /// Also add paid rewards to lifetime spend.
    pub fn with_rewards_counting_toward_level(mut self, enabled: bool) -> Self {
        self.rewards_count_toward_level = enabled;
        self
    }

    pub async fn handle(
        &self,
        cmd: EvaluateAndCommitCommand,
    ) -> Result<EvaluateAndCommitResult, LoyaltyError> {
        let now = self.clock.now();
        let catalog = self.catalog.load_catalog().await?;
        let unlocked: HashSet<AchievementId> = self
            .ledger
            .list_for_user(&cmd.user_id)
            .await?
            .into_iter()
            .map(|row| row.achievement_id)
            .collect();
        let state = self.user_states.snapshot(&cmd.user_id, now).await?;

        let earned = evaluate(&state, &catalog, &unlocked);
        tracing::debug!(
            user_id = %cmd.user_id,
            event = cmd.event.kind(),
            candidates = earned.len(),
            "Evaluated achievements"
        );

        let mut result = EvaluateAndCommitResult {
            event: cmd.event,
            unlocked: Vec::new(),
            failures: Vec::new(),
        };

        for achievement_id in earned {
            // evaluate only returns catalog ids
            let Some(achievement) = catalog.get(&achievement_id) else {
                continue;
            };
            match self.commit(&cmd.user_id, achievement, now).await? {
                Commit::Unlocked(unlocked) => result.unlocked.push(unlocked),
                Commit::LostRace => {}
                Commit::Failed(failure) => result.failures.push(failure),
            }
        }

        Ok(result)
    }

    async fn commit(
        &self,
        user_id: &UserId,
        achievement: &Achievement,
        now: Timestamp,
    ) -> Result<Commit, LoyaltyError> {
        let status = advance(UnlockStatus::Locked, UnlockStatus::Unlocking)?;
        let row = UserAchievement::new(user_id.clone(), achievement.id.clone(), now);

        match self.ledger.try_insert(&row).await {
            Ok(InsertOutcome::Inserted) => {
                advance(status, UnlockStatus::Unlocked)?;
                tracing::info!(
                    user_id = %user_id,
                    achievement_id = %achievement.id,
                    "Achievement unlocked"
                );
                let reward = self.pay_reward(user_id, achievement, now).await;
                Ok(Commit::Unlocked(UnlockedAchievement {
                    achievement_id: achievement.id.clone(),
                    title: achievement.title.clone(),
                    unlocked_at: now,
                    reward,
                }))
            }
            Ok(InsertOutcome::AlreadyExists) => {
                advance(status, UnlockStatus::Unlocked)?;
                tracing::warn!(
                    user_id = %user_id,
                    achievement_id = %achievement.id,
                    "Achievement unlocked concurrently by another evaluation"
                );
                Ok(Commit::LostRace)
            }
            Err(e) => {
                advance(status, UnlockStatus::Locked)?;
                tracing::error!(
                    user_id = %user_id,
                    achievement_id = %achievement.id,
                    error = %e,
                    "Failed to record unlock"
                );
                Ok(Commit::Failed(UnlockFailure {
                    achievement_id: achievement.id.clone(),
                    reason: e.to_string(),
                }))
            }
        }
    }

    async fn pay_reward(
        &self,
        user_id: &UserId,
        achievement: &Achievement,
        now: Timestamp,
    ) -> RewardStatus {
        let Some(amount) = achievement.reward() else {
            return RewardStatus::NoReward;
        };
        let grant = RewardGrant {
            user_id: user_id.clone(),
            achievement_id: achievement.id.clone(),
            amount,
            counts_toward_level: self.rewards_count_toward_level,
            granted_at: now,
        };

        match self.accounts.credit_reward(&grant).await {
            Ok(outcome) => {
                tracing::info!(
                    user_id = %user_id,
                    achievement_id = %achievement.id,
                    amount = amount.value(),
                    outcome = ?outcome,
                    "Achievement reward credited"
                );
                RewardStatus::Credited { amount }
            }
            Err(e) => {
                tracing::error!(
                    user_id = %user_id,
                    achievement_id = %achievement.id,
                    amount = amount.value(),
                    error = %e,
                    "Reward credit failed, left pending for reconciliation"
                );
                RewardStatus::Pending { amount }
            }
        }
    }
}

fn advance(from: UnlockStatus, to: UnlockStatus) -> Result<UnlockStatus, LoyaltyError> {
    from.transition_to(to)
        .map_err(|e| LoyaltyError::InvalidState(e.to_string()))
}
