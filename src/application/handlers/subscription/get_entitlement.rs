//! GetEntitlementHandler - Query handler for the tier a user currently has.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::loyalty::LoyaltyError;
use crate::domain::subscription::{is_expiring_within, Entitlement, SubscriptionTier};
use crate::ports::{Clock, ProfileReader};

/// Query to resolve a user's entitlement.
#[derive(Debug, Clone)]
pub struct GetEntitlementQuery {
    pub user_id: UserId,
}

/// What the tier badge, gated features and renewal banner render from.
///
/// A user without a profile gets `tier: None` ("unknown") instead of an
/// error, so dashboards degrade rather than fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitlementView {
    pub user_id: UserId,

    /// Effective tier, `None` when the profile is missing.
    pub tier: Option<SubscriptionTier>,

    pub entitlement: Option<Entitlement>,

    /// Active and expiring within the configured reminder window.
    pub expiring_soon: bool,
}

impl EntitlementView {
    pub fn is_active(&self) -> bool {
        self.entitlement.is_some_and(|e| e.is_active)
    }

    pub fn days_remaining(&self) -> Option<u32> {
        self.entitlement.and_then(|e| e.days_remaining)
    }
}

pub type GetEntitlementResult = EntitlementView;

pub struct GetEntitlementHandler {
    profiles: Arc<dyn ProfileReader>,
    clock: Arc<dyn Clock>,
    reminder_days: u32,
}

impl GetEntitlementHandler {
    pub fn new(profiles: Arc<dyn ProfileReader>, clock: Arc<dyn Clock>, reminder_days: u32) -> Self {
        Self {
            profiles,
            clock,
            reminder_days,
        }
    }

    pub async fn handle(&self, query: GetEntitlementQuery) -> Result<GetEntitlementResult, LoyaltyError> {
        let now = self.clock.now();
        let profile = self.profiles.get_profile(&query.user_id).await?;

        let Some(profile) = profile else {
            tracing::debug!(user_id = %query.user_id, "No profile, entitlement unknown");
            return Ok(EntitlementView {
                user_id: query.user_id,
                tier: None,
                entitlement: None,
                expiring_soon: false,
            });
        };

        let entitlement = Entitlement::resolve(&profile, now);
        if entitlement.is_lapsed() {
            tracing::debug!(
                user_id = %query.user_id,
                stored_tier = %entitlement.stored_tier,
                "Subscription lapsed, serving free tier"
            );
        }

        Ok(EntitlementView {
            user_id: query.user_id,
            tier: Some(entitlement.effective_tier),
            expiring_soon: is_expiring_within(&profile, now, self.reminder_days),
            entitlement: Some(entitlement),
        })
    }
}
