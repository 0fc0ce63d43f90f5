//! Achievement unlock ledger port.
//!
//! Append-only store of [`UserAchievement`] rows, unique per
//! (user, achievement).
//!
//! # Design
//!
//! - **Unique insert is the lock**: `try_insert` is the single atomic decision
//!   point of the unlock path. Implementations must rely on a uniqueness
//!   constraint (or an equivalent compare-and-set), never on a prior read,
//!   since evaluation can be triggered by several events at once.
//! - **No updates, no deletes**: once written, a row stays as it is.

use crate::domain::achievement::{InsertOutcome, UserAchievement};
use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

#[async_trait]
pub trait AchievementLedger: Send + Sync {
    /// Inserts the row unless one exists for the pair.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the insert could not be performed; the row was not written
    async fn try_insert(&self, row: &UserAchievement) -> Result<InsertOutcome, DomainError>;

    /// All rows for a user, oldest unlock first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserAchievement>, DomainError>;
}
