//! Entitlement resolution: which tier a profile actually grants right now.
//!
//! Everything here is a pure function of `(profile, now)`. Lapsing to free is a
//! view computed on read; the stored tier is never rewritten.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{Profile, SubscriptionTier};

/// Returns the tier granted at `now`.
///
/// - no expiry: the stored tier, unchanged
/// - expiry at or before `now`: [`SubscriptionTier::Free`]
/// - otherwise: the stored tier
pub fn effective_tier(profile: &Profile, now: Timestamp) -> SubscriptionTier {
    match profile.subscription_expires_at {
        None => profile.subscription_tier,
        Some(expires_at) if !expires_at.is_after(&now) => SubscriptionTier::Free,
        Some(_) => profile.subscription_tier,
    }
}

/// True iff the effective tier is a paid one.
pub fn is_active(profile: &Profile, now: Timestamp) -> bool {
    effective_tier(profile, now).is_paid()
}

/// Days left until the subscription expires, rounded up.
///
/// `None` without an expiry. Never negative: a lapsed subscription reports 0.
pub fn days_until_expiration(profile: &Profile, now: Timestamp) -> Option<u32> {
    profile.subscription_expires_at.map(|expires_at| {
        let days = now.whole_days_until(&expires_at).max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    })
}

/// True when an active subscription has an expiry within `days` days.
///
/// Drives renewal reminders.
pub fn is_expiring_within(profile: &Profile, now: Timestamp, days: u32) -> bool {
    if !is_active(profile, now) {
        return false;
    }
    matches!(days_until_expiration(profile, now), Some(left) if left <= days)
}

/// Everything the tier badge and countdown need, computed in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub stored_tier: SubscriptionTier,
    pub effective_tier: SubscriptionTier,
    pub is_active: bool,
    pub days_remaining: Option<u32>,
    pub expires_at: Option<Timestamp>,
}

impl Entitlement {
    pub fn resolve(profile: &Profile, now: Timestamp) -> Self {
        Self {
            stored_tier: profile.subscription_tier,
            effective_tier: effective_tier(profile, now),
            is_active: is_active(profile, now),
            days_remaining: days_until_expiration(profile, now),
            expires_at: profile.subscription_expires_at,
        }
    }

    /// True when the stored tier is paid but has lapsed.
    pub fn is_lapsed(&self) -> bool {
        self.stored_tier.is_paid() && !self.is_active
    }
}
