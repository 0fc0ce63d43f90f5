//! Achievement catalog source port.

use crate::domain::achievement::AchievementCatalog;
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Supplies the current achievement catalog.
///
/// Implementations may load once and serve from memory; the catalog is
/// append-only, so a slightly stale copy only delays new achievements.
#[async_trait]
pub trait AchievementCatalogSource: Send + Sync {
    async fn load_catalog(&self) -> Result<AchievementCatalog, DomainError>;
}
