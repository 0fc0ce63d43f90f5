//! User profile as read from the hosted data store.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::SubscriptionTier;

/// A dashboard user's profile.
///
/// Created at signup. `subscription_tier` and `subscription_expires_at` are
/// written by purchase and renewal flows outside this crate; here the record
/// is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,

    pub display_name: Option<String>,

    pub email: Option<String>,

    /// Tier as purchased. May be stale once the expiry passes.
    pub subscription_tier: SubscriptionTier,

    /// End of the paid period. `None` for tiers that never expire (e.g. free).
    pub subscription_expires_at: Option<Timestamp>,

    /// When the user finished filling in their profile, if ever.
    pub profile_completed_at: Option<Timestamp>,
}

impl Profile {
    /// A new free profile with no optional fields set.
    pub fn new_free(user_id: UserId) -> Self {
        Self {
            user_id,
            display_name: None,
            email: None,
            subscription_tier: SubscriptionTier::Free,
            subscription_expires_at: None,
            profile_completed_at: None,
        }
    }

    /// Builder-style helper used by adapters and tests.
    pub fn with_subscription(
        mut self,
        tier: SubscriptionTier,
        expires_at: Option<Timestamp>,
    ) -> Self {
        self.subscription_tier = tier;
        self.subscription_expires_at = expires_at;
        self
    }

    pub fn with_completed_at(mut self, completed_at: Timestamp) -> Self {
        self.profile_completed_at = Some(completed_at);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.profile_completed_at.is_some()
    }
}
