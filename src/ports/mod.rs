//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the hosted data store. Adapters implement these ports.
//!
//! ## Read Ports
//!
//! - `ProfileReader` - Stored subscription tier and expiry
//! - `UserStateReader` - Metrics snapshot for achievement evaluation
//! - `AchievementCatalogSource` - The achievement catalog
//!
//! ## Write Ports
//!
//! - `AchievementLedger` - Uniqueness-guarded unlock rows
//! - `BonusAccountRepository` - Balances and idempotent reward credits
//!
//! ## Time
//!
//! - `Clock` - Source of "now"

mod achievement_catalog_source;
mod achievement_ledger;
mod bonus_account_repository;
mod clock;
mod profile_reader;
mod user_state_reader;

pub use achievement_catalog_source::AchievementCatalogSource;
pub use achievement_ledger::AchievementLedger;
pub use bonus_account_repository::BonusAccountRepository;
pub use clock::Clock;
pub use profile_reader::ProfileReader;
pub use user_state_reader::UserStateReader;
