//! Bonus account repository port.
//!
//! # Design
//!
//! - **Idempotent credit**: `credit_reward` is keyed by (user, achievement).
//!   Implementations record the credit and increment the balance atomically,
//!   and a second grant for the same pair changes nothing.
//! - **Retry-safe**: because of the above, the reconciliation pass may call
//!   `credit_reward` for any ledger row whose credit is missing, any number of
//!   times.
//!
//! # Example
//!
//! ```ignore
//! match accounts.credit_reward(&grant).await? {
//!     CreditOutcome::Credited => tracing::info!("reward paid"),
//!     CreditOutcome::AlreadyCredited => {} // retry of an earlier success
//! }
//! ```

use crate::domain::foundation::{AchievementId, DomainError, UserId};
use crate::domain::loyalty::{BonusAccount, CreditOutcome, RewardCredit, RewardGrant};
use async_trait::async_trait;

#[async_trait]
pub trait BonusAccountRepository: Send + Sync {
    /// Returns `None` if the user has no bonus account yet.
    async fn get_account(&self, user_id: &UserId) -> Result<Option<BonusAccount>, DomainError>;

    /// Pays a reward exactly once per (user, achievement).
    ///
    /// Creates the account if it does not exist.
    ///
    /// # Errors
    ///
    /// - `BalanceOverflow` if the balance would exceed storage range
    /// - `DatabaseError` on persistence failure (nothing was applied)
    async fn credit_reward(&self, grant: &RewardGrant) -> Result<CreditOutcome, DomainError>;

    /// Looks up the credit recorded for a ledger row, if any.
    async fn find_credit(
        &self,
        user_id: &UserId,
        achievement_id: &AchievementId,
    ) -> Result<Option<RewardCredit>, DomainError>;
}
