//! Unlock ledger rows and the per-achievement unlock lifecycle.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AchievementId, StateMachine, Timestamp, UserId};

/// Unlock lifecycle of one (user, achievement) pair.
///
/// `Locked -> Unlocking -> Unlocked`. `Unlocking` falls back to `Locked` only
/// when the ledger insert itself failed (nothing was written). `Unlocked` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockStatus {
    Locked,
    Unlocking,
    Unlocked,
}

impl StateMachine for UnlockStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use UnlockStatus::*;
        matches!(
            (self, target),
            (Locked, Unlocking) | (Unlocking, Unlocked) | (Unlocking, Locked)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use UnlockStatus::*;
        match self {
            Locked => vec![Unlocking],
            Unlocking => vec![Unlocked, Locked],
            Unlocked => vec![],
        }
    }
}

/// Ledger row. Its existence is the only record that an achievement is
/// unlocked; it is written once and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAchievement {
    pub user_id: UserId,
    pub achievement_id: AchievementId,
    pub unlocked_at: Timestamp,
}

impl UserAchievement {
    pub fn new(user_id: UserId, achievement_id: AchievementId, unlocked_at: Timestamp) -> Self {
        Self {
            user_id,
            achievement_id,
            unlocked_at,
        }
    }
}

/// Result of the uniqueness-guarded ledger insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// This call created the row and owns the reward.
    Inserted,
    /// A row for the pair already existed; nothing was written.
    AlreadyExists,
}
