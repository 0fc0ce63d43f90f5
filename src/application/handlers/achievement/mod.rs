//! Achievement handlers.
//!
//! - `EvaluateAndCommitHandler` - the only write path for unlocks
//! - `ReconcileRewardsHandler` - pays rewards left pending by failed credits
//! - `GetAchievementStatsHandler`, `ListAchievementsHandler` - read side

mod evaluate_and_commit;
mod get_achievement_stats;
mod list_achievements;
mod reconcile_rewards;

pub use evaluate_and_commit::{
    EvaluateAndCommitCommand, EvaluateAndCommitHandler, EvaluateAndCommitResult, UnlockFailure,
    UnlockedAchievement,
};
pub use get_achievement_stats::{
    GetAchievementStatsHandler, GetAchievementStatsQuery, GetAchievementStatsResult,
};
pub use list_achievements::{ListAchievementsHandler, ListAchievementsQuery, ListAchievementsResult};
pub use reconcile_rewards::{
    ReconcileRewardsCommand, ReconcileRewardsHandler, ReconcileRewardsResult,
};
