//! Unlock rules.
//!
//! One variant per rule kind this build understands. Anything else in the
//! catalog (new kinds, malformed metadata) becomes [`UnlockRule::Unsupported`],
//! which never unlocks, so catalog growth cannot break evaluation of the
//! achievements that already exist.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::MinorUnits;

use super::UserState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnlockRule {
    /// A habit streak of at least `days`. Any habit when `habit` is absent.
    StreakDays {
        days: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        habit: Option<String>,
    },

    ReferralCount { count: u32 },

    LifetimeSpend { amount: MinorUnits },

    /// `metric` reached `target` on day `on`, or on any day when `on` is absent.
    DailyGoal {
        metric: String,
        target: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        on: Option<NaiveDate>,
    },

    ProfileCompleted,

    #[serde(other)]
    Unsupported,
}

impl UnlockRule {
    /// Interprets raw rule metadata from the catalog store.
    ///
    /// Never fails: unknown kinds and malformed metadata fail closed.
    pub fn from_metadata(metadata: &serde_json::Value) -> Self {
        match serde_json::from_value::<UnlockRule>(metadata.clone()) {
            Ok(rule) => rule,
            Err(e) => {
                tracing::warn!(
                    metadata = %metadata,
                    error = %e,
                    "Malformed achievement rule metadata, treating as unsupported"
                );
                UnlockRule::Unsupported
            }
        }
    }

    /// Stable name of the rule kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UnlockRule::StreakDays { .. } => "streak_days",
            UnlockRule::ReferralCount { .. } => "referral_count",
            UnlockRule::LifetimeSpend { .. } => "lifetime_spend",
            UnlockRule::DailyGoal { .. } => "daily_goal",
            UnlockRule::ProfileCompleted => "profile_completed",
            UnlockRule::Unsupported => "unsupported",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, UnlockRule::Unsupported)
    }

    /// Whether `state` meets this rule.
    pub fn is_satisfied_by(&self, state: &UserState) -> bool {
        match self {
            UnlockRule::StreakDays { days, habit: Some(habit) } => state
                .habit_streaks
                .get(habit)
                .is_some_and(|streak| streak >= days),
            UnlockRule::StreakDays { days, habit: None } => state.best_streak() >= *days,
            UnlockRule::ReferralCount { count } => state.referral_count >= *count,
            UnlockRule::LifetimeSpend { amount } => state.lifetime_spend >= *amount,
            UnlockRule::DailyGoal { metric, target, on: Some(day) } => state
                .metric_on(*day, metric)
                .is_some_and(|value| value >= *target),
            UnlockRule::DailyGoal { metric, target, on: None } => state
                .best_day(metric)
                .is_some_and(|value| value >= *target),
            UnlockRule::ProfileCompleted => state.profile_completed,
            UnlockRule::Unsupported => false,
        }
    }
}

/// `deserialize_with` helper for catalog files: parse leniently, failing closed.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<UnlockRule, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(UnlockRule::from_metadata(&value))
}
