//! Achievement evaluator.
//!
//! Decides which achievements a user has newly earned. Idempotence lives
//! here: anything already in the ledger is never reported again, so callers
//! can re-run evaluation on every event without bookkeeping of their own.

use std::collections::HashSet;

use crate::domain::foundation::AchievementId;

use super::{AchievementCatalog, UserState};

/// Returns ids whose rule `state` satisfies and that are not yet unlocked,
/// in catalog order.
///
/// Pure and deterministic: the same snapshot, catalog and ledger contents
/// always give the same answer. Secret achievements are evaluated like any
/// other. Unsupported rules never match and are reported in the log.
pub fn evaluate(
    state: &UserState,
    catalog: &AchievementCatalog,
    unlocked: &HashSet<AchievementId>,
) -> Vec<AchievementId> {
    catalog
        .iter()
        .filter(|achievement| !unlocked.contains(&achievement.id))
        .filter(|achievement| {
            if !achievement.rule.is_supported() {
                tracing::warn!(
                    achievement_id = %achievement.id,
                    "Achievement has an unsupported unlock rule and cannot be earned"
                );
                return false;
            }
            achievement.rule.is_satisfied_by(state)
        })
        .map(|achievement| achievement.id.clone())
        .collect()
}
