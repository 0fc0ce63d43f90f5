//! Subscription handlers.

mod get_entitlement;

pub use get_entitlement::{
    EntitlementView, GetEntitlementHandler, GetEntitlementQuery, GetEntitlementResult,
};
