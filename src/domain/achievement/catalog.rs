//! Achievement catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{AchievementId, MinorUnits, ValidationError};

use super::rule::{deserialize_lenient, UnlockRule};

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Grouping used by the achievements screen ("habits", "referrals", ...).
    pub category: String,

    /// Secret achievements hide title and description until unlocked.
    #[serde(default)]
    pub is_secret: bool,

    #[serde(default)]
    pub reward_amount: Option<MinorUnits>,

    #[serde(deserialize_with = "deserialize_lenient")]
    pub rule: UnlockRule,

    #[serde(default)]
    pub sort_order: i32,
}

impl Achievement {
    /// Reward to pay on unlock. A zero amount means no reward.
    pub fn reward(&self) -> Option<MinorUnits> {
        self.reward_amount.filter(|amount| *amount > MinorUnits::ZERO)
    }
}

/// The full, ordered set of achievements.
///
/// Entries are kept in display order (`sort_order`, then id) and ids are
/// unique. The catalog only ever grows over the product's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AchievementCatalog {
    entries: Vec<Achievement>,
}

impl AchievementCatalog {
    pub fn new(mut entries: Vec<Achievement>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.clone()) {
                return Err(ValidationError::invalid_format(
                    "achievements",
                    format!("duplicate achievement id '{}'", entry.id),
                ));
            }
            if entry.title.trim().is_empty() {
                return Err(ValidationError::empty_field(format!("{}.title", entry.id)));
            }
        }
        entries.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.id.cmp(&b.id)));
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &AchievementId) -> Option<&Achievement> {
        self.entries.iter().find(|a| &a.id == id)
    }

    pub fn contains(&self, id: &AchievementId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids whose rules this build cannot interpret.
    pub fn unsupported_ids(&self) -> Vec<&AchievementId> {
        self.entries
            .iter()
            .filter(|a| !a.rule.is_supported())
            .map(|a| &a.id)
            .collect()
    }
}

impl<'de> Deserialize<'de> for AchievementCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<Achievement>::deserialize(deserializer)?;
        AchievementCatalog::new(entries).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn achievement(id: &str, rule: UnlockRule, reward: Option<u64>) -> Achievement {
        Achievement {
            id: AchievementId::new(id).unwrap(),
            title: format!("Title of {}", id),
            description: format!("Description of {}", id),
            category: "general".to_string(),
            is_secret: false,
            reward_amount: reward.map(MinorUnits::new),
            rule,
            sort_order: 0,
        }
    }
}
