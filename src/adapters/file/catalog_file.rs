//! Achievement catalog from a YAML file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::OnceCell;

use crate::domain::achievement::AchievementCatalog;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::AchievementCatalogSource;

/// Reads the catalog file on first use and serves the parsed copy after that.
///
/// ```yaml
/// - id: streak_7
///   title: One week strong
///   category: habits
///   reward_amount: 500
///   rule: { kind: streak_days, days: 7 }
/// ```
pub struct YamlCatalogSource {
    path: PathBuf,
    cached: OnceCell<AchievementCatalog>,
}

impl YamlCatalogSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cached: OnceCell::new(),
        }
    }

    async fn read(&self) -> Result<AchievementCatalog, DomainError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::CatalogUnavailable,
                format!("Failed to read achievement catalog: {}", e),
            )
            .with_detail("path", self.path.display().to_string())
        })?;

        let catalog: AchievementCatalog = serde_yaml::from_str(&content).map_err(|e| {
            DomainError::new(
                ErrorCode::InvalidCatalog,
                format!("Invalid achievement catalog: {}", e),
            )
            .with_detail("path", self.path.display().to_string())
        })?;

        let unsupported = catalog.unsupported_ids();
        if !unsupported.is_empty() {
            tracing::warn!(
                path = %self.path.display(),
                count = unsupported.len(),
                "Catalog contains achievements with unsupported rules; they will never unlock"
            );
        }
        tracing::info!(
            path = %self.path.display(),
            achievements = catalog.len(),
            "Loaded achievement catalog"
        );
        Ok(catalog)
    }
}

#[async_trait]
impl AchievementCatalogSource for YamlCatalogSource {
    async fn load_catalog(&self) -> Result<AchievementCatalog, DomainError> {
        self.cached
            .get_or_try_init(|| self.read())
            .await
            .map(Clone::clone)
    }
}
