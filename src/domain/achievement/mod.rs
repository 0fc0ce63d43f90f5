//! Achievement domain module.
//!
//! Catalog, unlock rules, the evaluator that finds newly earned achievements,
//! and the ledger types that record each unlock exactly once.
//!
//! # Module Structure
//!
//! - `catalog` - Achievement entries and the ordered catalog
//! - `rule` - Tagged unlock rules with an unsupported fallback
//! - `user_state` - Metrics snapshot rules are evaluated against
//! - `evaluator` - Newly satisfied, not yet unlocked achievements
//! - `unlock` - Ledger row and the Locked/Unlocking/Unlocked lifecycle
//! - `stats` - Unlocked/total/percentage aggregates
//! - `view` - Display projection with secret masking
//! - `events` - Evaluation triggers

mod catalog;
mod evaluator;
mod events;
mod rule;
mod stats;
mod unlock;
mod user_state;
mod view;

pub use catalog::{Achievement, AchievementCatalog};
#[cfg(test)]
pub(crate) use catalog::fixtures;
pub use evaluator::evaluate;
pub use events::LoyaltyEvent;
pub use rule::UnlockRule;
pub use stats::{AchievementStats, CategoryStats};
pub use unlock::{InsertOutcome, UnlockStatus, UserAchievement};
pub use user_state::UserState;
pub use view::AchievementView;
