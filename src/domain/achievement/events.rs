//! Triggers that prompt achievement evaluation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::MinorUnits;

/// What just happened for the user.
///
/// The evaluator always reads a fresh snapshot, so the event itself only
/// names the trigger for logs and for the caller's celebratory feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoyaltyEvent {
    HabitToggled { habit: String, date: NaiveDate },
    PurchaseCompleted { amount: MinorUnits },
    ReferralRegistered,
    ProfileUpdated,
    ScheduledRecheck,
}

impl LoyaltyEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            LoyaltyEvent::HabitToggled { .. } => "habit_toggled",
            LoyaltyEvent::PurchaseCompleted { .. } => "purchase_completed",
            LoyaltyEvent::ReferralRegistered => "referral_registered",
            LoyaltyEvent::ProfileUpdated => "profile_updated",
            LoyaltyEvent::ScheduledRecheck => "scheduled_recheck",
        }
    }
}
