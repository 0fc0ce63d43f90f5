//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, money, timestamps, errors)
//! - `subscription` - Stored tier, expiry and the effective entitlement
//! - `loyalty` - Cashback level table, level progress and bonus accounts
//! - `achievement` - Catalog, unlock rules, evaluator, ledger rows and stats

pub mod achievement;
pub mod foundation;
pub mod loyalty;
pub mod subscription;
