//! Cashback level table.
//!
//! The table is process-wide configuration: loaded once at startup (from a
//! file, or the built-in default) and never mutated afterwards. Only the
//! bonus account it is compared against changes.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MinorUnits, Percentage, ValidationError};

/// One rung of the cashback program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashbackLevel {
    /// 1-based level number.
    pub level: u32,

    pub name: String,

    /// Cashback percent earned on purchases at this level.
    pub percent: Percentage,

    /// Minimum lifetime spend to reach this level.
    pub min_spend: MinorUnits,
}

impl CashbackLevel {
    pub fn new(level: u32, name: impl Into<String>, percent: u8, min_spend: u64) -> Self {
        Self {
            level,
            name: name.into(),
            percent: Percentage::new(percent),
            min_spend: MinorUnits::new(min_spend),
        }
    }
}

/// Validated, ascending list of cashback levels.
///
/// # Invariants
///
/// - at least one level
/// - the first level's threshold is 0, so every spend maps to a level
/// - thresholds strictly increase
/// - in threshold order, levels are numbered 1..N with no gaps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: Vec<CashbackLevel>,
}

impl LevelTable {
    /// Builds a table, sorting by threshold and checking the invariants.
    pub fn new(mut levels: Vec<CashbackLevel>) -> Result<Self, ValidationError> {
        if levels.is_empty() {
            return Err(ValidationError::empty_field("levels"));
        }
        levels.sort_by_key(|l| l.min_spend);

        if levels[0].min_spend != MinorUnits::ZERO {
            return Err(ValidationError::invalid_format(
                "levels",
                format!(
                    "lowest level threshold must be 0, got {}",
                    levels[0].min_spend
                ),
            ));
        }

        for level in &levels {
            if level.name.trim().is_empty() {
                return Err(ValidationError::empty_field(format!(
                    "levels[{}].name",
                    level.level
                )));
            }
        }

        for pair in levels.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if lower.min_spend == upper.min_spend {
                return Err(ValidationError::invalid_format(
                    "levels",
                    format!(
                        "levels {} and {} share threshold {}",
                        lower.level, upper.level, lower.min_spend
                    ),
                ));
            }
        }

        for (index, level) in levels.iter().enumerate() {
            let expected = index as u32 + 1;
            if level.level != expected {
                return Err(ValidationError::invalid_format(
                    "levels",
                    format!(
                        "level with threshold {} is numbered {}, expected {}",
                        level.min_spend, level.level, expected
                    ),
                ));
            }
        }

        Ok(Self { levels })
    }

    /// The built-in program used when no table file is configured.
    pub fn standard() -> &'static LevelTable {
        &STANDARD_TABLE
    }

    pub fn levels(&self) -> &[CashbackLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn top(&self) -> &CashbackLevel {
        &self.levels[self.levels.len() - 1]
    }

    /// Index of the highest level whose threshold is <= `spend`.
    pub(crate) fn index_for(&self, spend: MinorUnits) -> usize {
        // levels[0].min_spend == 0, so the partition point is always >= 1.
        self.levels.partition_point(|l| l.min_spend <= spend) - 1
    }
}

impl<'de> Deserialize<'de> for LevelTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let levels = Vec::<CashbackLevel>::deserialize(deserializer)?;
        LevelTable::new(levels).map_err(serde::de::Error::custom)
    }
}

static STANDARD_TABLE: Lazy<LevelTable> = Lazy::new(|| LevelTable {
    levels: vec![
        CashbackLevel::new(1, "Start", 3, 0),
        CashbackLevel::new(2, "Silver", 5, 1_000_000),
        CashbackLevel::new(3, "Gold", 7, 5_000_000),
        CashbackLevel::new(4, "Platinum", 10, 15_000_000),
    ],
});
