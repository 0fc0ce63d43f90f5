//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Hosted data store (profiles, ledger, bonus accounts, catalog)
//! - `file` - YAML level table and catalog loaders
//! - `memory` - In-memory stores for tests and single-process hosts
//! - `clock` - System and fixed clocks

pub mod clock;
pub mod file;
pub mod memory;
pub mod postgres;

pub use clock::{FixedClock, SystemClock};
pub use file::{load_level_table, YamlCatalogSource};
pub use memory::{
    InMemoryAchievementLedger, InMemoryBonusAccounts, InMemoryProfileReader,
    InMemoryUserStateReader, StaticCatalogSource,
};
