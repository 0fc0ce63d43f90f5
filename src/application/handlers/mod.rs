//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod achievement;
pub mod loyalty;
pub mod subscription;

pub use achievement::{
    EvaluateAndCommitCommand, EvaluateAndCommitHandler, EvaluateAndCommitResult,
    GetAchievementStatsHandler, GetAchievementStatsQuery, GetAchievementStatsResult,
    ListAchievementsHandler, ListAchievementsQuery, ListAchievementsResult,
    ReconcileRewardsCommand, ReconcileRewardsHandler, ReconcileRewardsResult, UnlockFailure,
    UnlockedAchievement,
};
pub use loyalty::{
    GetLevelProgressHandler, GetLevelProgressQuery, GetLevelProgressResult, LevelProgressView,
};
pub use subscription::{
    EntitlementView, GetEntitlementHandler, GetEntitlementQuery, GetEntitlementResult,
};
