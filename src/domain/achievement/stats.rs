//! Achievement progress aggregates.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::domain::foundation::{AchievementId, Percentage};

use super::AchievementCatalog;

/// Totals for one catalog category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: u32,
    pub unlocked: u32,
}

/// "12 of 40 unlocked (30%)".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementStats {
    /// Every catalog entry, secret ones included.
    pub total: u32,
    pub unlocked: u32,
    pub percentage: Percentage,
    pub by_category: BTreeMap<String, CategoryStats>,
}

impl AchievementStats {
    /// Counts `unlocked` against the catalog.
    ///
    /// Ledger ids missing from the catalog are ignored, which keeps
    /// `unlocked <= total` and the percentage within [0, 100].
    pub fn compute(catalog: &AchievementCatalog, unlocked: &HashSet<AchievementId>) -> Self {
        let mut stats = AchievementStats::default();
        for achievement in catalog.iter() {
            let is_unlocked = unlocked.contains(&achievement.id);
            let category = stats
                .by_category
                .entry(achievement.category.clone())
                .or_default();
            category.total += 1;
            stats.total += 1;
            if is_unlocked {
                category.unlocked += 1;
                stats.unlocked += 1;
            }
        }
        stats.percentage = Percentage::from_ratio(u64::from(stats.unlocked), u64::from(stats.total));
        stats
    }
}
