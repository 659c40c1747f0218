//! Ledger state across reopen, for each on-disk backend.

use std::sync::Arc;

use crossword_shared::keys;
use crossword_shared::{
    Difficulty, JsonFileStore, KvStore, ProgressLedger, SharedStore, SqliteStore, WallpaperShop,
    WinOptions,
};
use tempfile::TempDir;

async fn play_some(store: SharedStore) {
    let ledger = Arc::new(ProgressLedger::open(store).await.unwrap());
    ledger
        .apply_win("thermal", Difficulty::Easy, 0, WinOptions::default())
        .await
        .unwrap();
    ledger
        .apply_win("symbols", Difficulty::Extreme, 1, WinOptions::with_hint())
        .await
        .unwrap();
    ledger.set_topic_index("thermal", Difficulty::Easy, 1).await.unwrap();

    // 3 + 6 coupons, then a 2-coupon hint
    assert_eq!(ledger.consume_coupons(2).await.unwrap(), 7);
}

async fn assert_restored(store: SharedStore) {
    let ledger = ProgressLedger::open(store).await.unwrap();
    let snap = ledger.snapshot().await;
    assert_eq!(snap.coupons, 7);
    assert_eq!(snap.completed_easy, 1);
    assert_eq!(snap.completed_total, 2);
    assert_eq!(snap.no_hint_wins, 1);
    assert_eq!(snap.topic_index("thermal", Difficulty::Easy), 1);
    assert!(snap.completed.contains("symbols:extreme:1"));

    // Already rewarded before the restart
    let again = ledger
        .apply_win("thermal", Difficulty::Easy, 0, WinOptions::default())
        .await
        .unwrap();
    assert!(!again.first_time);
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progress.json");

    play_some(Arc::new(JsonFileStore::new(&path))).await;
    assert_restored(Arc::new(JsonFileStore::new(&path))).await;

    // Values are stored as strings, matching the key layout
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc[keys::COUPONS], "7");
}

#[tokio::test]
async fn sqlite_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progress.db");

    play_some(Arc::new(SqliteStore::open(&path).await.unwrap())).await;
    assert_restored(Arc::new(SqliteStore::open(&path).await.unwrap())).await;
}

#[tokio::test]
async fn wallpaper_ownership_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progress.db");

    {
        let store: SharedStore = Arc::new(SqliteStore::open(&path).await.unwrap());
        store.set(keys::COUPONS, "20").await.unwrap();
        let shop = WallpaperShop::new(Arc::new(ProgressLedger::open(store).await.unwrap()));
        shop.purchase("4").await.unwrap();
    }

    let store: SharedStore = Arc::new(SqliteStore::open(&path).await.unwrap());
    let ledger = Arc::new(ProgressLedger::open(store).await.unwrap());
    assert_eq!(ledger.coupons().await, 10);
    let shop = WallpaperShop::new(ledger);
    assert!(shop.is_owned("4").await.unwrap());
    assert!(!shop.is_owned("5").await.unwrap());
}
