//! Subscription domain module.
//!
//! Stored tier + expiry on the profile, and the pure rules that turn them into
//! the entitlement shown on tier badges and day countdowns.
//!
//! # Module Structure
//!
//! - `tier` - SubscriptionTier levels
//! - `profile` - Profile record (read-only here)
//! - `entitlement` - Effective tier, active flag, days remaining

mod entitlement;
mod profile;
mod tier;

pub use entitlement::{
    days_until_expiration, effective_tier, is_active, is_expiring_within, Entitlement,
};
pub use profile::Profile;
pub use tier::SubscriptionTier;
