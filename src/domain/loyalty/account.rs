//! Bonus account and reward credits.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AchievementId, MinorUnits, Timestamp, UserId};

/// A user's loyalty balance.
///
/// `balance` is spendable bonus; `lifetime_spend` is what the cashback level
/// is computed from. Both are non-negative by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusAccount {
    pub user_id: UserId,
    pub balance: MinorUnits,
    pub lifetime_spend: MinorUnits,
}

impl BonusAccount {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            balance: MinorUnits::ZERO,
            lifetime_spend: MinorUnits::ZERO,
        }
    }
}

/// Instruction to pay an achievement's reward into a bonus account.
///
/// The (user, achievement) pair is the idempotency key: a grant for a pair
/// that was already paid is a no-op, however often it is retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardGrant {
    pub user_id: UserId,
    pub achievement_id: AchievementId,
    pub amount: MinorUnits,

    /// Also add `amount` to lifetime spend. Program policy, set from config.
    pub counts_toward_level: bool,

    pub granted_at: Timestamp,
}

/// A paid reward, as recorded by the bonus account store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCredit {
    pub user_id: UserId,
    pub achievement_id: AchievementId,
    pub amount: MinorUnits,
    pub credited_at: Timestamp,
}

/// Result of applying a [`RewardGrant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditOutcome {
    /// Balance incremented by this call.
    Credited,
    /// A credit for this pair already existed; balance untouched.
    AlreadyCredited,
}

/// What happened to the reward of a freshly unlocked achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RewardStatus {
    /// The achievement carries no reward.
    NoReward,
    Credited { amount: MinorUnits },
    /// The unlock is recorded but the credit failed; reconciliation pays it later.
    Pending { amount: MinorUnits },
}

impl RewardStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, RewardStatus::Pending { .. })
    }

    pub fn amount(&self) -> Option<MinorUnits> {
        match self {
            RewardStatus::NoReward => None,
            RewardStatus::Credited { amount } | RewardStatus::Pending { amount } => Some(*amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_account_starts_at_zero() {
        let account = BonusAccount::empty(UserId::new("u1").unwrap());
        assert_eq!(account.balance, MinorUnits::ZERO);
        assert_eq!(account.lifetime_spend, MinorUnits::ZERO);
    }

    #[test]
    fn pending_reward_keeps_its_amount() {
        let status = RewardStatus::Pending {
            amount: MinorUnits::new(250),
        };
        assert!(status.is_pending());
        assert_eq!(status.amount(), Some(MinorUnits::new(250)));
        assert_eq!(RewardStatus::NoReward.amount(), None);
    }

    #[test]
    fn reward_status_serializes_with_tag() {
        let json = serde_json::to_value(RewardStatus::Credited {
            amount: MinorUnits::new(500),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"status": "credited", "amount": 500}));
    }
}
