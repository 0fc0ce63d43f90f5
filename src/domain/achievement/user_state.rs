//! Snapshot of the user metrics achievement rules are evaluated against.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{MinorUnits, Timestamp, UserId};

/// Point-in-time view of everything unlock rules may look at.
///
/// Ordered maps keep evaluation (and its logging) deterministic for a given
/// snapshot. `as_of` is the only notion of "now" the evaluator sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub user_id: UserId,

    pub as_of: Timestamp,

    /// Current streak in days, per habit name.
    #[serde(default)]
    pub habit_streaks: BTreeMap<String, u32>,

    #[serde(default)]
    pub referral_count: u32,

    #[serde(default)]
    pub lifetime_spend: MinorUnits,

    /// Per-day metric totals, e.g. `2025-03-01 -> {"steps": 12_400}`.
    #[serde(default)]
    pub daily_metrics: BTreeMap<NaiveDate, BTreeMap<String, u64>>,

    #[serde(default)]
    pub profile_completed: bool,
}

impl UserState {
    pub fn new(user_id: UserId, as_of: Timestamp) -> Self {
        Self {
            user_id,
            as_of,
            habit_streaks: BTreeMap::new(),
            referral_count: 0,
            lifetime_spend: MinorUnits::ZERO,
            daily_metrics: BTreeMap::new(),
            profile_completed: false,
        }
    }

    pub fn with_streak(mut self, habit: impl Into<String>, days: u32) -> Self {
        self.habit_streaks.insert(habit.into(), days);
        self
    }

    pub fn with_referrals(mut self, count: u32) -> Self {
        self.referral_count = count;
        self
    }

    pub fn with_lifetime_spend(mut self, spend: MinorUnits) -> Self {
        self.lifetime_spend = spend;
        self
    }

    pub fn with_daily_metric(mut self, day: NaiveDate, metric: impl Into<String>, value: u64) -> Self {
        self.daily_metrics
            .entry(day)
            .or_default()
            .insert(metric.into(), value);
        self
    }

    pub fn with_profile_completed(mut self, completed: bool) -> Self {
        self.profile_completed = completed;
        self
    }

    /// Longest current streak across all habits.
    pub fn best_streak(&self) -> u32 {
        self.habit_streaks.values().copied().max().unwrap_or(0)
    }

    pub fn metric_on(&self, day: NaiveDate, metric: &str) -> Option<u64> {
        self.daily_metrics.get(&day)?.get(metric).copied()
    }

    /// Highest single-day value recorded for `metric`.
    pub fn best_day(&self, metric: &str) -> Option<u64> {
        self.daily_metrics
            .values()
            .filter_map(|metrics| metrics.get(metric).copied())
            .max()
    }
}
