//! Level progress calculator.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MinorUnits, Percentage};

use super::{CashbackLevel, LevelTable};

/// Where a lifetime spend sits within the cashback program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub lifetime_spend: MinorUnits,

    pub level: CashbackLevel,

    /// `None` at the top level.
    pub next_level: Option<CashbackLevel>,

    /// Exact spend still needed for the next level; zero at the top level.
    pub remaining_to_next: MinorUnits,

    /// Position between the current and next threshold, rounded for display.
    /// At most 99 below the next threshold; always 100 at the top level.
    pub progress_percent: Percentage,
}

impl LevelProgress {
    pub fn cashback_percent(&self) -> Percentage {
        self.level.percent
    }

    pub fn is_top_level(&self) -> bool {
        self.next_level.is_none()
    }
}

/// Maps a lifetime spend to its level and the progress toward the next one.
pub fn level_progress(lifetime_spend: MinorUnits, table: &LevelTable) -> LevelProgress {
    let levels = table.levels();
    let index = table.index_for(lifetime_spend);
    let level = levels[index].clone();

    match levels.get(index + 1) {
        None => LevelProgress {
            lifetime_spend,
            level,
            next_level: None,
            remaining_to_next: MinorUnits::ZERO,
            progress_percent: Percentage::HUNDRED,
        },
        Some(next) => {
            let span = next.min_spend.saturating_sub(level.min_spend);
            let covered = lifetime_spend.saturating_sub(level.min_spend);
            LevelProgress {
                lifetime_spend,
                remaining_to_next: next.min_spend.saturating_sub(lifetime_spend),
                // 100% is reserved for a reached threshold.
                progress_percent: Percentage::new(
                    Percentage::from_ratio(covered.value(), span.value()).value().min(99),
                ),
                next_level: Some(next.clone()),
                level,
            }
        }
    }
}

/// Cashback earned on a purchase of `amount` at `level`, rounded down.
pub fn cashback_for_purchase(amount: MinorUnits, level: &CashbackLevel) -> MinorUnits {
    let earned = u128::from(amount.value()) * u128::from(level.percent.value()) / 100;
    // percent <= 100, so earned <= amount and always fits.
    MinorUnits::new(earned as u64)
}
