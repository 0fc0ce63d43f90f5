//! Property-based tests for entitlement, level progress and stats.
//!
//! Properties tested:
//! 1. A past expiry always yields the free tier, inactive, with 0 days left
//! 2. No expiry always yields the stored tier
//! 3. Days remaining is never negative and `None` only without an expiry
//! 4. The resolved level is the unique level whose band contains the spend
//! 5. Top level means no next level and 100% progress
//! 6. Stats percentage stays within [0, 100]

use proptest::prelude::*;
use std::collections::HashSet;

use fitness_loyalty::domain::achievement::{
    Achievement, AchievementCatalog, AchievementStats, UnlockRule,
};
use fitness_loyalty::domain::foundation::{AchievementId, MinorUnits, Timestamp, UserId};
use fitness_loyalty::domain::loyalty::{level_progress, CashbackLevel, LevelTable};
use fitness_loyalty::domain::subscription::{
    days_until_expiration, effective_tier, is_active, Profile, SubscriptionTier,
};

// ── Strategies ──

fn any_tier() -> impl Strategy<Value = SubscriptionTier> {
    prop::sample::select(SubscriptionTier::ALL.to_vec())
}

/// Seconds around 2025-06-01, roughly ±3 years.
fn any_instant() -> impl Strategy<Value = Timestamp> {
    (-100_000_000i64..100_000_000i64).prop_map(|offset| {
        let base = Timestamp::parse_rfc3339("base", "2025-06-01T00:00:00Z").unwrap();
        Timestamp::from_datetime(*base.as_datetime() + chrono::Duration::seconds(offset))
    })
}

/// Strictly increasing thresholds starting at 0.
fn any_level_table() -> impl Strategy<Value = LevelTable> {
    prop::collection::vec(1u64..1_000_000, 0..6).prop_map(|gaps| {
        let mut threshold = 0u64;
        let mut levels = vec![CashbackLevel::new(1, "L1", 1, 0)];
        for (i, gap) in gaps.into_iter().enumerate() {
            threshold += gap;
            let number = i as u32 + 2;
            levels.push(CashbackLevel::new(number, format!("L{}", number), number as u8, threshold));
        }
        LevelTable::new(levels).unwrap()
    })
}

fn profile(tier: SubscriptionTier, expires_at: Option<Timestamp>) -> Profile {
    Profile::new_free(UserId::new("prop-user").unwrap()).with_subscription(tier, expires_at)
}

proptest! {
    #[test]
    fn past_expiry_is_free_and_inactive(
        tier in any_tier(),
        now in any_instant(),
        ago_secs in 0i64..50_000_000,
    ) {
        let expires = Timestamp::from_datetime(*now.as_datetime() - chrono::Duration::seconds(ago_secs));
        let p = profile(tier, Some(expires));

        prop_assert_eq!(effective_tier(&p, now), SubscriptionTier::Free);
        prop_assert!(!is_active(&p, now));
        prop_assert_eq!(days_until_expiration(&p, now), Some(0));
    }

    #[test]
    fn no_expiry_keeps_stored_tier(tier in any_tier(), now in any_instant()) {
        let p = profile(tier, None);

        prop_assert_eq!(effective_tier(&p, now), tier);
        prop_assert_eq!(days_until_expiration(&p, now), None);
    }

    #[test]
    fn future_expiry_counts_whole_days_up(
        tier in any_tier(),
        now in any_instant(),
        ahead_secs in 1i64..50_000_000,
    ) {
        let expires = Timestamp::from_datetime(*now.as_datetime() + chrono::Duration::seconds(ahead_secs));
        let p = profile(tier, Some(expires));

        let days = days_until_expiration(&p, now).unwrap();
        prop_assert!(days >= 1);
        prop_assert_eq!(u64::from(days), (ahead_secs as u64).div_ceil(86_400));
        prop_assert_eq!(effective_tier(&p, now), tier);
    }

    #[test]
    fn level_band_contains_spend(table in any_level_table(), spend in 0u64..10_000_000) {
        let progress = level_progress(MinorUnits::new(spend), &table);

        prop_assert!(progress.level.min_spend <= MinorUnits::new(spend));
        match &progress.next_level {
            Some(next) => {
                prop_assert!(MinorUnits::new(spend) < next.min_spend);
                prop_assert_eq!(
                    progress.remaining_to_next,
                    MinorUnits::new(next.min_spend.value() - spend)
                );
                prop_assert!(progress.progress_percent.value() < 100);
            }
            None => {
                prop_assert_eq!(progress.level.level, table.top().level);
                prop_assert_eq!(progress.progress_percent.value(), 100);
                prop_assert_eq!(progress.remaining_to_next, MinorUnits::ZERO);
            }
        }
    }

    #[test]
    fn stats_percentage_is_bounded(
        size in 0usize..20,
        unlocked_mask in prop::collection::vec(any::<bool>(), 20),
        stray in 0usize..5,
    ) {
        let entries: Vec<Achievement> = (0..size)
            .map(|i| Achievement {
                id: AchievementId::new(format!("a_{}", i)).unwrap(),
                title: format!("A {}", i),
                description: String::new(),
                category: if i % 2 == 0 { "even" } else { "odd" }.to_string(),
                is_secret: i % 3 == 0,
                reward_amount: None,
                rule: UnlockRule::ProfileCompleted,
                sort_order: i as i32,
            })
            .collect();
        let catalog = AchievementCatalog::new(entries).unwrap();

        let mut unlocked: HashSet<AchievementId> = (0..size)
            .filter(|i| unlocked_mask[*i])
            .map(|i| AchievementId::new(format!("a_{}", i)).unwrap())
            .collect();
        // Ledger rows for achievements no longer in the catalog.
        for i in 0..stray {
            unlocked.insert(AchievementId::new(format!("retired_{}", i)).unwrap());
        }

        let stats = AchievementStats::compute(&catalog, &unlocked);

        prop_assert!(stats.unlocked <= stats.total);
        prop_assert!(stats.percentage.value() <= 100);
        if size == 0 {
            prop_assert_eq!(stats.percentage.value(), 0);
        }
    }
}
