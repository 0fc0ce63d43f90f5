//! ListAchievementsHandler - Query handler for the achievements screen.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::achievement::AchievementView;
use crate::domain::foundation::{AchievementId, Timestamp, UserId};
use crate::domain::loyalty::LoyaltyError;
use crate::ports::{AchievementCatalogSource, AchievementLedger};

#[derive(Debug, Clone)]
pub struct ListAchievementsQuery {
    pub user_id: UserId,

    /// Restrict to one category.
    pub category: Option<String>,
}

/// Catalog entries in display order, secrets masked until unlocked.
pub type ListAchievementsResult = Vec<AchievementView>;

pub struct ListAchievementsHandler {
    catalog: Arc<dyn AchievementCatalogSource>,
    ledger: Arc<dyn AchievementLedger>,
}

impl ListAchievementsHandler {
    pub fn new(catalog: Arc<dyn AchievementCatalogSource>, ledger: Arc<dyn AchievementLedger>) -> Self {
        Self { catalog, ledger }
    }

    pub async fn handle(
        &self,
        query: ListAchievementsQuery,
    ) -> Result<ListAchievementsResult, LoyaltyError> {
        let (catalog, rows) = futures::try_join!(
            self.catalog.load_catalog(),
            self.ledger.list_for_user(&query.user_id)
        )?;
        let unlocked_at: HashMap<AchievementId, Timestamp> = rows
            .into_iter()
            .map(|row| (row.achievement_id, row.unlocked_at))
            .collect();

        Ok(catalog
            .iter()
            .filter(|a| query.category.as_ref().map_or(true, |c| &a.category == c))
            .map(|a| AchievementView::for_display(a, unlocked_at.get(&a.id).copied()))
            .collect())
    }
}
