//! Display projection of catalog entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AchievementId, MinorUnits, Timestamp};

use super::Achievement;

/// An achievement as the achievements screen may show it.
///
/// Secret achievements that are still locked carry no title, description or
/// reward; the screen renders them as a "?" badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementView {
    pub id: AchievementId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub is_secret: bool,
    pub reward_amount: Option<MinorUnits>,
    pub unlocked_at: Option<Timestamp>,
    pub sort_order: i32,
}

impl AchievementView {
    pub fn for_display(achievement: &Achievement, unlocked_at: Option<Timestamp>) -> Self {
        let hidden = achievement.is_secret && unlocked_at.is_none();
        Self {
            id: achievement.id.clone(),
            title: (!hidden).then(|| achievement.title.clone()),
            description: (!hidden).then(|| achievement.description.clone()),
            category: achievement.category.clone(),
            is_secret: achievement.is_secret,
            reward_amount: if hidden { None } else { achievement.reward() },
            unlocked_at,
            sort_order: achievement.sort_order,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }
}
