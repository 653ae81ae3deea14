//! Integration tests for the bounded storage context

mod test_helpers;

use soundcheck_core::{storage::StorageContext, SoundcheckError};
use soundcheck_storage::LocalStorageContext;
use std::time::Duration;
use test_helpers::*;

#[tokio::test]
async fn test_calls_within_budget_succeed() {
    let test_db = TestDb::new().await;
    let store = LocalStorageContext::new(test_db.pool().clone())
        .with_query_timeout(Duration::from_secs(5));

    let id = store.resolve_or_create_user("punctual").await.unwrap();
    assert_eq!(store.resolve_or_create_user("punctual").await.unwrap(), id);
}

#[tokio::test]
async fn test_call_blocked_past_budget_times_out_and_rolls_back() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    // Hold SQLite's write lock from another connection so the insert waits
    let mut blocker = pool.acquire().await.unwrap();
    sqlx::query("BEGIN IMMEDIATE")
        .execute(&mut *blocker)
        .await
        .unwrap();

    let store = LocalStorageContext::new(pool.clone())
        .with_query_timeout(Duration::from_millis(200));

    let err = store.resolve_or_create_user("latecomer").await.unwrap_err();
    assert!(
        matches!(err, SoundcheckError::Timeout(ref op) if op == "resolve_or_create_user"),
        "unexpected error: {err:?}"
    );

    sqlx::query("ROLLBACK").execute(&mut *blocker).await.unwrap();
    drop(blocker);

    assert_eq!(count_rows(pool, "users").await, 0);

    // The store stays usable once the lock is gone
    let store = store.with_query_timeout(Duration::from_secs(5));
    store.resolve_or_create_user("latecomer").await.unwrap();
    assert_eq!(count_rows(pool, "users").await, 1);
}

#[tokio::test]
async fn test_album_exists() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let store = LocalStorageContext::new(pool.clone());

    let artist = create_test_artist(pool, "Stereolab").await;
    let album = create_test_album(pool, "Dots and Loops", artist, "1997-09-22").await;

    assert!(store.album_exists(album).await.unwrap());
    assert!(!store.album_exists(album + 1).await.unwrap());
}
