//! Catalog source serving a fixed catalog.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::achievement::AchievementCatalog;
use crate::domain::foundation::DomainError;
use crate::ports::AchievementCatalogSource;

/// Serves a catalog built once, e.g. from a YAML file at startup.
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    catalog: Arc<AchievementCatalog>,
}

impl StaticCatalogSource {
    pub fn new(catalog: AchievementCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

#[async_trait]
impl AchievementCatalogSource for StaticCatalogSource {
    async fn load_catalog(&self) -> Result<AchievementCatalog, DomainError> {
        Ok(self.catalog.as_ref().clone())
    }
}
