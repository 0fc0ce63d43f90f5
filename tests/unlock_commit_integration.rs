//! Integration tests for the unlock and reward commit path.
//!
//! These tests verify the end-to-end flow:
//! 1. A loyalty event triggers evaluation against a fresh user snapshot
//! 2. Earned achievements are inserted into the ledger exactly once
//! 3. Rewards are credited exactly once, even under concurrent evaluation
//! 4. Rewards whose credit failed are paid later by reconciliation
//!
//! Uses the in-memory adapters so no database is required.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fitness_loyalty::adapters::{
    FixedClock, InMemoryAchievementLedger, InMemoryBonusAccounts, InMemoryUserStateReader,
    StaticCatalogSource,
};
use fitness_loyalty::application::{
    EvaluateAndCommitCommand, EvaluateAndCommitHandler, GetAchievementStatsHandler,
    GetAchievementStatsQuery, GetLevelProgressHandler, GetLevelProgressQuery,
    ReconcileRewardsCommand, ReconcileRewardsHandler,
};
use fitness_loyalty::domain::achievement::{
    Achievement, AchievementCatalog, LoyaltyEvent, UnlockRule, UserState,
};
use fitness_loyalty::domain::foundation::{
    AchievementId, DomainError, ErrorCode, MinorUnits, Percentage, Timestamp, UserId,
};
use fitness_loyalty::domain::loyalty::{
    BonusAccount, CreditOutcome, LevelTable, RewardCredit, RewardGrant, RewardStatus,
};
use fitness_loyalty::ports::BonusAccountRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Bonus accounts whose credits fail until `recover()` is called.
struct FlakyAccounts {
    inner: InMemoryBonusAccounts,
    down: AtomicBool,
}

impl FlakyAccounts {
    fn down() -> Self {
        Self {
            inner: InMemoryBonusAccounts::new(),
            down: AtomicBool::new(true),
        }
    }

    fn recover(&self) {
        self.down.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl BonusAccountRepository for FlakyAccounts {
    async fn get_account(&self, user_id: &UserId) -> Result<Option<BonusAccount>, DomainError> {
        self.inner.get_account(user_id).await
    }

    async fn credit_reward(&self, grant: &RewardGrant) -> Result<CreditOutcome, DomainError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(DomainError::new(ErrorCode::DatabaseError, "connection reset"));
        }
        self.inner.credit_reward(grant).await
    }

    async fn find_credit(
        &self,
        user_id: &UserId,
        achievement_id: &AchievementId,
    ) -> Result<Option<RewardCredit>, DomainError> {
        self.inner.find_credit(user_id, achievement_id).await
    }
}

fn user() -> UserId {
    UserId::new("8f14e45f-ceea-467f-a0e6-bc6d3f7e5c21").unwrap()
}

fn id(s: &str) -> AchievementId {
    AchievementId::new(s).unwrap()
}

fn entry(slug: &str, category: &str, rule: UnlockRule, reward: Option<u64>, sort_order: i32) -> Achievement {
    Achievement {
        id: id(slug),
        title: slug.replace('_', " "),
        description: String::new(),
        category: category.to_string(),
        is_secret: false,
        reward_amount: reward.map(MinorUnits::new),
        rule,
        sort_order,
    }
}

fn catalog() -> AchievementCatalog {
    AchievementCatalog::new(vec![
        entry("first_referral", "referrals", UnlockRule::ReferralCount { count: 1 }, None, 1),
        entry("referrals_5", "referrals", UnlockRule::ReferralCount { count: 5 }, Some(1000), 2),
        entry(
            "streak_7",
            "habits",
            UnlockRule::StreakDays {
                days: 7,
                habit: None,
            },
            Some(300),
            3,
        ),
    ])
    .unwrap()
}

async fn states_with(state: UserState) -> InMemoryUserStateReader {
    let states = InMemoryUserStateReader::new();
    states.insert(state).await;
    states
}

fn evaluate_handler(
    ledger: &InMemoryAchievementLedger,
    states: &InMemoryUserStateReader,
    accounts: Arc<dyn BonusAccountRepository>,
) -> EvaluateAndCommitHandler {
    EvaluateAndCommitHandler::new(
        Arc::new(StaticCatalogSource::new(catalog())),
        Arc::new(ledger.clone()),
        Arc::new(states.clone()),
        accounts,
        Arc::new(FixedClock::new(Timestamp::now())),
    )
}

fn referral_event() -> EvaluateAndCommitCommand {
    EvaluateAndCommitCommand {
        user_id: user(),
        event: LoyaltyEvent::ReferralRegistered,
    }
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn concurrent_evaluations_unlock_and_credit_once() {
    let ledger = InMemoryAchievementLedger::new();
    let accounts = InMemoryBonusAccounts::new();
    let states = states_with(UserState::new(user(), Timestamp::now()).with_referrals(5)).await;
    let handler = Arc::new(evaluate_handler(&ledger, &states, Arc::new(accounts.clone())));

    let mut tasks = Vec::new();
    for _ in 0..2 {
        let handler = handler.clone();
        tasks.push(tokio::spawn(async move { handler.handle(referral_event()).await }));
    }
    let results: Vec<_> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let reported: usize = results
        .iter()
        .map(|r| {
            r.unlocked
                .iter()
                .filter(|u| u.achievement_id == id("referrals_5"))
                .count()
        })
        .sum();
    assert_eq!(reported, 1, "exactly one evaluation reports the unlock");
    assert_eq!(ledger.count_for(&user()).await, 2); // first_referral + referrals_5
    assert_eq!(accounts.credit_count_for(&user()).await, 1);

    let account = accounts.get_account(&user()).await.unwrap().unwrap();
    assert_eq!(account.balance, MinorUnits::new(1000));
}

#[tokio::test]
async fn many_concurrent_evaluations_still_credit_once() {
    let ledger = InMemoryAchievementLedger::new();
    let accounts = InMemoryBonusAccounts::new();
    let states = states_with(
        UserState::new(user(), Timestamp::now())
            .with_referrals(5)
            .with_streak("water", 7),
    )
    .await;
    let handler = Arc::new(evaluate_handler(&ledger, &states, Arc::new(accounts.clone())));

    let tasks: Vec<_> = (0..25)
        .map(|_| {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(referral_event()).await })
        })
        .collect();
    for joined in futures::future::join_all(tasks).await {
        joined.unwrap().unwrap();
    }

    assert_eq!(ledger.count_for(&user()).await, 3);
    assert_eq!(accounts.credit_count_for(&user()).await, 2);
    let account = accounts.get_account(&user()).await.unwrap().unwrap();
    assert_eq!(account.balance, MinorUnits::new(1300));
}

// =============================================================================
// Idempotence and progress
// =============================================================================

#[tokio::test]
async fn repeated_events_on_stable_state_change_nothing() {
    let ledger = InMemoryAchievementLedger::new();
    let accounts = InMemoryBonusAccounts::new();
    let states = states_with(UserState::new(user(), Timestamp::now()).with_referrals(5)).await;
    let handler = evaluate_handler(&ledger, &states, Arc::new(accounts.clone()));

    let first = handler.handle(referral_event()).await.unwrap();
    let second = handler.handle(referral_event()).await.unwrap();

    assert_eq!(first.unlocked.len(), 2);
    assert!(second.unlocked.is_empty());
    assert_eq!(accounts.credit_count_for(&user()).await, 1);
}

#[tokio::test]
async fn stats_follow_unlocks() {
    let ledger = InMemoryAchievementLedger::new();
    let accounts = InMemoryBonusAccounts::new();
    let states = states_with(UserState::new(user(), Timestamp::now()).with_referrals(1)).await;
    let handler = evaluate_handler(&ledger, &states, Arc::new(accounts));
    let stats = GetAchievementStatsHandler::new(
        Arc::new(StaticCatalogSource::new(catalog())),
        Arc::new(ledger.clone()),
    );

    handler.handle(referral_event()).await.unwrap();
    let result = stats
        .handle(GetAchievementStatsQuery { user_id: user() })
        .await
        .unwrap();

    assert_eq!(result.total, 3);
    assert_eq!(result.unlocked, 1);
    assert_eq!(result.percentage, Percentage::new(33));
    assert_eq!(result.by_category["referrals"].unlocked, 1);
    assert_eq!(result.by_category["habits"].unlocked, 0);
}

#[tokio::test]
async fn rewards_counting_toward_level_move_progress() {
    let ledger = InMemoryAchievementLedger::new();
    let accounts = InMemoryBonusAccounts::new();
    let states = states_with(UserState::new(user(), Timestamp::now()).with_referrals(5)).await;
    let handler = evaluate_handler(&ledger, &states, Arc::new(accounts.clone()))
        .with_rewards_counting_toward_level(true);
    let levels = Arc::new(
        LevelTable::new(vec![
            fitness_loyalty::domain::loyalty::CashbackLevel::new(1, "Start", 3, 0),
            fitness_loyalty::domain::loyalty::CashbackLevel::new(2, "Silver", 5, 1000),
        ])
        .unwrap(),
    );
    let progress = GetLevelProgressHandler::new(Arc::new(accounts), levels);

    handler.handle(referral_event()).await.unwrap();
    let view = progress
        .handle(GetLevelProgressQuery::for_user(user()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(view.progress.level.level, 2);
    assert!(view.progress.is_top_level());
}

// =============================================================================
// Partial failure and reconciliation
// =============================================================================

#[tokio::test]
async fn pending_reward_is_paid_by_reconciliation() {
    let ledger = InMemoryAchievementLedger::new();
    let accounts = Arc::new(FlakyAccounts::down());
    let states = states_with(UserState::new(user(), Timestamp::now()).with_referrals(5)).await;
    let handler = evaluate_handler(&ledger, &states, accounts.clone());
    let reconcile = ReconcileRewardsHandler::new(
        Arc::new(StaticCatalogSource::new(catalog())),
        Arc::new(ledger.clone()),
        accounts.clone(),
        Arc::new(FixedClock::new(Timestamp::now())),
    );

    let result = handler.handle(referral_event()).await.unwrap();
    let referral = result
        .unlocked
        .iter()
        .find(|u| u.achievement_id == id("referrals_5"))
        .unwrap();
    assert_eq!(
        referral.reward,
        RewardStatus::Pending {
            amount: MinorUnits::new(1000)
        }
    );

    // Still down: nothing paid, reported as pending.
    let attempt = reconcile
        .handle(ReconcileRewardsCommand { user_id: user() })
        .await
        .unwrap();
    assert_eq!(attempt.still_pending, vec![id("referrals_5")]);

    accounts.recover();
    let settled = reconcile
        .handle(ReconcileRewardsCommand { user_id: user() })
        .await
        .unwrap();
    assert!(settled.is_settled());
    assert_eq!(settled.credited, vec![(id("referrals_5"), MinorUnits::new(1000))]);

    // Re-evaluating never re-inserts or re-pays.
    let again = handler.handle(referral_event()).await.unwrap();
    assert!(again.unlocked.is_empty());
    let account = accounts.get_account(&user()).await.unwrap().unwrap();
    assert_eq!(account.balance, MinorUnits::new(1000));
    assert_eq!(ledger.count_for(&user()).await, 2);
}
