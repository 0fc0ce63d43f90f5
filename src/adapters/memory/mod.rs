//! In-memory adapters.
//!
//! Backed by tokio `RwLock`ed maps. Used by the test suites and by hosts that
//! run the engine in a single process.

mod achievement_ledger;
mod bonus_accounts;
mod catalog;
mod profiles;

pub use achievement_ledger::InMemoryAchievementLedger;
pub use bonus_accounts::InMemoryBonusAccounts;
pub use catalog::StaticCatalogSource;
pub use profiles::{InMemoryProfileReader, InMemoryUserStateReader};
