//! Monetary amounts in minor currency units.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A non-negative amount in minor currency units (kopecks, cents).
///
/// Spend, balances, thresholds and rewards are all integers; there is no
/// floating point anywhere on the money path.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MinorUnits(u64);

impl MinorUnits {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Converts a signed storage value, rejecting negatives.
    ///
    /// Negative spend is never clamped to zero: that would silently move a
    /// user down a cashback level.
    pub fn try_from_i64(field: &str, value: i64) -> Result<Self, ValidationError> {
        u64::try_from(value).map(Self).map_err(|_| {
            ValidationError::invalid_format(field, format!("must not be negative, got {}", value))
        })
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Signed representation for storage columns (`BIGINT`).
    pub fn to_i64(&self, field: &str) -> Result<i64, ValidationError> {
        i64::try_from(self.0).map_err(|_| {
            ValidationError::invalid_format(field, format!("{} exceeds storage range", self.0))
        })
    }

    pub fn checked_add(self, other: MinorUnits) -> Option<MinorUnits> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: MinorUnits) -> MinorUnits {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
