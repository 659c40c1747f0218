//! Ledger behaviour across whole play sessions.
//!
//! Tests verify:
//! - A puzzle instance pays out once, however often it is solved
//! - Counters stay consistent with the completed set
//! - Tier unlocks never go backwards
//! - Spending never drives the balance negative
//! - Resume indices are independent per topic and difficulty
//! - Store failures surface as errors and leave the mirror alone

use std::sync::Arc;

use crossword_shared::keys;
use crossword_shared::{
    CrosswordError, Difficulty, KvStore, MemoryStore, ProgressLedger, PuzzleInstanceId, WinOptions,
};

async fn fresh_ledger() -> (Arc<MemoryStore>, Arc<ProgressLedger>) {
    let store = Arc::new(MemoryStore::new());
    let ledger = Arc::new(ProgressLedger::open(store.clone()).await.unwrap());
    (store, ledger)
}

#[tokio::test]
async fn repeated_win_pays_once() {
    let (_, ledger) = fresh_ledger().await;

    let first = ledger
        .apply_win("arts", Difficulty::Medium, 1, WinOptions::default())
        .await
        .unwrap();
    let second = ledger
        .apply_win("arts", Difficulty::Medium, 1, WinOptions::default())
        .await
        .unwrap();

    assert!(first.first_time);
    assert_eq!(first.reward, 4);
    assert!(!second.first_time);
    assert_eq!(second.reward, 0);

    let snap = ledger.snapshot().await;
    assert_eq!(snap.coupons, 4);
    assert_eq!(snap.completed_medium, 1);
    assert_eq!(snap.completed_total, 1);
    assert!(snap.is_completed(&PuzzleInstanceId::new("arts", Difficulty::Medium, 1)));
}

#[tokio::test]
async fn concurrent_wins_for_same_instance_reward_once() {
    let (store, ledger) = fresh_ledger().await;

    let a = ledger.clone();
    let b = ledger.clone();
    let (ra, rb) = tokio::join!(
        a.apply_win("symbols", Difficulty::Easy, 0, WinOptions::default()),
        b.apply_win("symbols", Difficulty::Easy, 0, WinOptions::default()),
    );
    let outcomes = [ra.unwrap(), rb.unwrap()];

    assert_eq!(outcomes.iter().filter(|o| o.first_time).count(), 1);
    assert_eq!(store.raw(keys::COUPONS).await.as_deref(), Some("3"));
    assert_eq!(store.raw(keys::COMPLETED_EASY).await.as_deref(), Some("1"));
}

#[tokio::test]
async fn concurrent_wins_across_tasks_reward_each_instance_once() {
    let (_, ledger) = fresh_ledger().await;

    let mut handles = Vec::new();
    for round in 0..4 {
        for index in 0..2u32 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                let options = WinOptions {
                    used_hint: round % 2 == 1,
                };
                ledger
                    .apply_win("thermal", Difficulty::Easy, index, options)
                    .await
            }));
        }
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let snap = ledger.snapshot().await;
    assert_eq!(snap.completed_easy, 2);
    assert_eq!(snap.completed_total, 2);
    assert_eq!(snap.coupons, 6);
}

#[tokio::test]
async fn counters_match_completed_set() {
    let (_, ledger) = fresh_ledger().await;

    let wins = [
        ("thermal", Difficulty::Easy, 0),
        ("thermal", Difficulty::Easy, 1),
        ("arts", Difficulty::Easy, 0),
        ("arch", Difficulty::Medium, 0),
        ("arch", Difficulty::Hard, 1),
        ("society", Difficulty::Extreme, 0),
        ("thermal", Difficulty::Easy, 0),
    ];
    for (topic, difficulty, index) in wins {
        ledger
            .apply_win(topic, difficulty, index, WinOptions::default())
            .await
            .unwrap();
    }

    let snap = ledger.snapshot().await;
    let count = |d: Difficulty| {
        snap.completed
            .iter()
            .filter(|id| id.parse::<PuzzleInstanceId>().unwrap().difficulty == d)
            .count() as u64
    };

    assert_eq!(snap.completed.len(), 6);
    assert_eq!(snap.completed_total, snap.completed.len() as u64);
    assert_eq!(snap.completed_easy, count(Difficulty::Easy));
    assert_eq!(snap.completed_medium, count(Difficulty::Medium));
    assert_eq!(snap.completed_hard, count(Difficulty::Hard));
    assert_eq!(snap.coupons, 3 * 3 + 4 + 5 + 6);
}

#[tokio::test]
async fn no_hint_counter_only_counts_clean_first_wins() {
    let (_, ledger) = fresh_ledger().await;

    ledger
        .apply_win("arts", Difficulty::Easy, 0, WinOptions::default())
        .await
        .unwrap();
    ledger
        .apply_win("arts", Difficulty::Easy, 1, WinOptions::with_hint())
        .await
        .unwrap();
    // A repeat without hints does not count again
    ledger
        .apply_win("arts", Difficulty::Easy, 1, WinOptions::default())
        .await
        .unwrap();

    let snap = ledger.snapshot().await;
    assert_eq!(snap.no_hint_wins, 1);
    assert_eq!(snap.completed_total, 2);
}

#[tokio::test]
async fn unlocks_never_regress() {
    let (_, ledger) = fresh_ledger().await;
    let mut previous = ledger.unlocks().await;
    assert!(previous.is_unlocked(Difficulty::Easy));
    assert!(!previous.is_unlocked(Difficulty::Medium));

    let topics = ["thermal", "arts", "arch", "society", "symbols"];
    let mut plays = Vec::new();
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        for (i, topic) in topics.iter().enumerate() {
            plays.push((*topic, difficulty, (i % 2) as u32));
        }
    }

    for (topic, difficulty, index) in plays {
        ledger
            .apply_win(topic, difficulty, index, WinOptions::default())
            .await
            .unwrap();
        let now = ledger.unlocks().await;
        assert_eq!(
            now.is_unlocked(Difficulty::Medium),
            ledger.snapshot().await.completed_easy >= 4
        );
        for d in Difficulty::ALL {
            assert!(!previous.is_unlocked(d) || now.is_unlocked(d));
        }
        // Spending never locks anything
        ledger.consume_coupons(1_000).await.unwrap();
        assert_eq!(ledger.unlocks().await, now);
        previous = now;
    }

    assert_eq!(previous.highest(), Difficulty::Extreme);
}

#[tokio::test]
async fn spending_clamps_at_zero() {
    let store = Arc::new(MemoryStore::with_entries([(keys::COUPONS, "7")]));
    let ledger = ProgressLedger::open(store.clone()).await.unwrap();

    assert_eq!(ledger.consume_coupons(5).await.unwrap(), 2);
    assert_eq!(ledger.consume_coupons(5).await.unwrap(), 0);
    assert_eq!(ledger.consume_coupons(0).await.unwrap(), 0);
    assert_eq!(store.raw(keys::COUPONS).await.as_deref(), Some("0"));
}

#[tokio::test]
async fn spend_reads_persisted_balance() {
    let (store, ledger) = fresh_ledger().await;
    // Another writer credited coupons after we loaded
    store.set(keys::COUPONS, "12").await.unwrap();

    assert_eq!(ledger.try_spend(10).await.unwrap(), Some(2));
    assert_eq!(ledger.coupons().await, 2);
}

#[tokio::test]
async fn resume_indices_are_independent() {
    let (store, ledger) = fresh_ledger().await;

    ledger.set_topic_index("thermal", Difficulty::Easy, 1).await.unwrap();
    ledger.set_topic_index("thermal", Difficulty::Hard, 0).await.unwrap();
    ledger.set_topic_index("arts", Difficulty::Easy, 1).await.unwrap();
    ledger.set_topic_index("thermal", Difficulty::Easy, 0).await.unwrap();

    assert_eq!(ledger.get_topic_index("thermal", Difficulty::Easy).await, 0);
    assert_eq!(ledger.get_topic_index("thermal", Difficulty::Hard).await, 0);
    assert_eq!(ledger.get_topic_index("arts", Difficulty::Easy).await, 1);
    assert_eq!(ledger.get_topic_index("arch", Difficulty::Medium).await, 0);

    let raw = store.raw(keys::TOPIC_PROGRESS).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["arts"]["easy"], 1);
    assert_eq!(json["thermal"]["hard"], 0);
}

#[tokio::test]
async fn resume_index_merges_with_persisted_map() {
    let (store, ledger) = fresh_ledger().await;
    store
        .set(keys::TOPIC_PROGRESS, r#"{"society":{"medium":1}}"#)
        .await
        .unwrap();

    ledger.set_topic_index("arch", Difficulty::Easy, 1).await.unwrap();

    assert_eq!(ledger.get_topic_index("society", Difficulty::Medium).await, 1);
    assert_eq!(ledger.get_topic_index("arch", Difficulty::Easy).await, 1);
}

#[tokio::test]
async fn write_failure_is_reported() {
    let (store, ledger) = fresh_ledger().await;
    store.set_fail_writes(true);

    let err = ledger.consume_coupons(1).await.unwrap_err();
    assert!(err.is_persistence());
    let err = ledger
        .set_topic_index("arts", Difficulty::Easy, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, CrosswordError::Store(_)));

    assert_eq!(ledger.get_topic_index("arts", Difficulty::Easy).await, 0);
}

#[tokio::test]
async fn read_failure_aborts_win() {
    let (store, ledger) = fresh_ledger().await;
    store.fail_reads_for(keys::COMPLETED_SET).await;

    let result = ledger
        .apply_win("arts", Difficulty::Easy, 0, WinOptions::default())
        .await;
    assert!(result.is_err());
    assert_eq!(store.raw(keys::COUPONS).await, None);
}

#[tokio::test]
async fn load_fails_only_when_every_read_fails() {
    let store = Arc::new(MemoryStore::with_entries([(keys::COUPONS, "3")]));
    for key in [
        keys::COUPONS,
        keys::COMPLETED_EASY,
        keys::COMPLETED_MEDIUM,
        keys::COMPLETED_HARD,
        keys::COMPLETED_TOTAL,
        keys::NO_HINT_WINS,
        keys::TOPIC_PROGRESS,
        keys::COMPLETED_SET,
    ] {
        store.fail_reads_for(key).await;
    }

    let ledger = ProgressLedger::new(store.clone());
    assert!(ledger.load().await.is_err());
    assert!(!ledger.is_loaded());

    store.clear_read_failures().await;
    let snap = ledger.reload().await.unwrap();
    assert_eq!(snap.coupons, 3);
    assert!(ledger.is_loaded());
}
