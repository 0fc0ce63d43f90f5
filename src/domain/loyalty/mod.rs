//! Loyalty domain module.
//!
//! Cashback levels, level progress and the bonus account that achievement
//! rewards are paid into.
//!
//! # Module Structure
//!
//! - `level` - CashbackLevel and the validated LevelTable
//! - `progress` - Level progress and purchase cashback
//! - `account` - BonusAccount and idempotent reward credits
//! - `errors` - LoyaltyError returned by the application handlers

mod account;
mod errors;
mod level;
mod progress;

pub use account::{BonusAccount, CreditOutcome, RewardCredit, RewardGrant, RewardStatus};
pub use errors::LoyaltyError;
pub use level::{CashbackLevel, LevelTable};
pub use progress::{cashback_for_purchase, level_progress, LevelProgress};
