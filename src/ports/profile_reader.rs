//! Profile reader port.
//!
//! Profiles live in the hosted data store and are written by signup and
//! purchase flows elsewhere. This crate only reads them.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::Profile;
use async_trait::async_trait;

#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Returns `None` if the user has no profile.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a stored field is malformed (bad tier, negative value)
    /// - `DatabaseError` on read failure
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;
}
