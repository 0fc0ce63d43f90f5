//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//!
//! Commands: `EvaluateAndCommit`, `ReconcileRewards`.
//! Queries: `GetEntitlement`, `GetLevelProgress`, `GetAchievementStats`,
//! `ListAchievements`.

pub mod handlers;

pub use handlers::*;
