//! GetAchievementStatsHandler - Query handler for unlocked/total counts.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::achievement::AchievementStats;
use crate::domain::foundation::{AchievementId, UserId};
use crate::domain::loyalty::LoyaltyError;
use crate::ports::{AchievementCatalogSource, AchievementLedger};

#[derive(Debug, Clone)]
pub struct GetAchievementStatsQuery {
    pub user_id: UserId,
}

pub type GetAchievementStatsResult = AchievementStats;

pub struct GetAchievementStatsHandler {
    catalog: Arc<dyn AchievementCatalogSource>,
    ledger: Arc<dyn AchievementLedger>,
}

impl GetAchievementStatsHandler {
    pub fn new(catalog: Arc<dyn AchievementCatalogSource>, ledger: Arc<dyn AchievementLedger>) -> Self {
        Self { catalog, ledger }
    }

    pub async fn handle(
        &self,
        query: GetAchievementStatsQuery,
    ) -> Result<GetAchievementStatsResult, LoyaltyError> {
        let (catalog, rows) = futures::try_join!(
            self.catalog.load_catalog(),
            self.ledger.list_for_user(&query.user_id)
        )?;
        let unlocked: HashSet<AchievementId> =
            rows.into_iter().map(|row| row.achievement_id).collect();

        Ok(AchievementStats::compute(&catalog, &unlocked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryAchievementLedger, StaticCatalogSource};
    use crate::domain::achievement::{
        fixtures::achievement, AchievementCatalog, UnlockRule, UserAchievement,
    };
    use crate::domain::foundation::{DomainError, ErrorCode, Percentage, Timestamp};
    use async_trait::async_trait;

    struct UnavailableCatalog;

    #[async_trait]
    impl AchievementCatalogSource for UnavailableCatalog {
        async fn load_catalog(&self) -> Result<AchievementCatalog, DomainError> {
            Err(DomainError::new(ErrorCode::CatalogUnavailable, "Simulated outage"))
        }
    }

    fn user() -> UserId {
        UserId::new("user-42").unwrap()
    }

    fn row(id: &str) -> UserAchievement {
        UserAchievement::new(user(), AchievementId::new(id).unwrap(), Timestamp::now())
    }

    fn three_entry_catalog() -> AchievementCatalog {
        let mut secret = achievement("night_owl", UnlockRule::ProfileCompleted, None);
        secret.is_secret = true;
        AchievementCatalog::new(vec![
            achievement("first_steps", UnlockRule::ProfileCompleted, None),
            achievement("referrals_5", UnlockRule::ReferralCount { count: 5 }, None),
            secret,
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn counts_secret_entries_in_total() {
        let ledger = InMemoryAchievementLedger::with_rows(vec![row("first_steps")]).await;
        let handler = GetAchievementStatsHandler::new(
            Arc::new(StaticCatalogSource::new(three_entry_catalog())),
            Arc::new(ledger),
        );

        let stats = handler.handle(GetAchievementStatsQuery { user_id: user() }).await.unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.unlocked, 1);
        assert_eq!(stats.percentage, Percentage::new(33));
    }

    #[tokio::test]
    async fn rows_outside_catalog_are_ignored() {
        let ledger =
            InMemoryAchievementLedger::with_rows(vec![row("first_steps"), row("retired_badge")]).await;
        let handler = GetAchievementStatsHandler::new(
            Arc::new(StaticCatalogSource::new(three_entry_catalog())),
            Arc::new(ledger),
        );

        let stats = handler.handle(GetAchievementStatsQuery { user_id: user() }).await.unwrap();

        assert_eq!(stats.unlocked, 1);
    }

    #[tokio::test]
    async fn empty_catalog_reports_zero_percent() {
        let handler = GetAchievementStatsHandler::new(
            Arc::new(StaticCatalogSource::new(AchievementCatalog::empty())),
            Arc::new(InMemoryAchievementLedger::new()),
        );

        let stats = handler.handle(GetAchievementStatsQuery { user_id: user() }).await.unwrap();

        assert_eq!(stats.total, 0);
        assert_eq!(stats.percentage, Percentage::ZERO);
    }

    #[tokio::test]
    async fn catalog_outage_is_retryable() {
        let handler = GetAchievementStatsHandler::new(
            Arc::new(UnavailableCatalog),
            Arc::new(InMemoryAchievementLedger::new()),
        );

        let err = handler
            .handle(GetAchievementStatsQuery { user_id: user() })
            .await
            .unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(err.code(), ErrorCode::CatalogUnavailable);
    }
}
