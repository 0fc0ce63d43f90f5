//! User state reader port.
//!
//! Assembles the metrics snapshot (habit streaks, step counts, referrals,
//! purchase totals) that unlock rules are evaluated against.

use crate::domain::achievement::UserState;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use async_trait::async_trait;

#[async_trait]
pub trait UserStateReader: Send + Sync {
    /// Snapshot of the user's metrics as of `as_of`.
    ///
    /// Users without any tracked data get an empty snapshot, not an error.
    async fn snapshot(&self, user_id: &UserId, as_of: Timestamp) -> Result<UserState, DomainError>;
}
