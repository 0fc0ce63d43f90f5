//! Clock port.
//!
//! Every "now" in the handlers comes from here, so time-dependent results
//! (lapsed tiers, countdowns, unlock timestamps) are reproducible in tests.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
