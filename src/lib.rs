//! Entitlement and loyalty engine for the fitness dashboard.
//!
//! Resolves the subscription tier a user actually has, places their lifetime
//! spend on the cashback level ladder, and unlocks achievements (paying their
//! bonus rewards) exactly once per user.
//!
//! # Architecture
//!
//! - `domain` - Pure types and calculations
//! - `ports` - Traits for the hosted data store and the clock
//! - `adapters` - PostgreSQL, YAML file and in-memory implementations
//! - `application` - Command and query handlers
//! - `config` - Environment configuration and tracing setup

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
