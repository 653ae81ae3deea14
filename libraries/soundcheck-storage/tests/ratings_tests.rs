//! Integration tests for the rating aggregation view

mod test_helpers;

use soundcheck_storage::ratings::{self, TOP_RATED_LIMIT};
use test_helpers::*;

#[tokio::test]
async fn test_aggregate_matches_comments() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Can").await;
    let album = create_test_album(pool, "Tago Mago", artist, "1971-02-01").await;
    for (author, rating) in [("a", 3), ("b", 4), ("c", 5)] {
        post_test_comment(pool, album, author, rating).await;
    }

    let all = ratings::get_all(pool).await.unwrap();
    assert_eq!(all.len(), 1);

    let summary = &all[0];
    assert_eq!(summary.album_id, album);
    assert_eq!(summary.title, "Tago Mago");
    assert_eq!(summary.artist_name, "Can");
    assert_eq!(summary.total_comments, 3);
    assert!((summary.average_rating - 4.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_unreviewed_album_listed_with_zero_but_not_top_rated() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Neu!").await;
    let reviewed = create_test_album(pool, "Neu! 75", artist, "1975-01-01").await;
    let quiet = create_test_album(pool, "Neu! 2", artist, "1973-01-01").await;
    post_test_comment(pool, reviewed, "dana", 4).await;

    let all = ratings::get_all(pool).await.unwrap();
    let unreviewed = all
        .iter()
        .find(|r| r.album_id == quiet)
        .expect("unreviewed album belongs in the full listing");
    assert_eq!(unreviewed.total_comments, 0);
    assert_eq!(unreviewed.average_rating, 0.0);

    let top = ratings::top_rated(pool, TOP_RATED_LIMIT).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].album_id, reviewed);
}

#[tokio::test]
async fn test_full_listing_orders_by_count_then_average() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Faust").await;
    let popular = create_test_album(pool, "Popular", artist, "2000-01-01").await;
    let loved = create_test_album(pool, "Loved", artist, "2001-01-01").await;
    let liked = create_test_album(pool, "Liked", artist, "2002-01-01").await;
    let ignored = create_test_album(pool, "Ignored", artist, "2003-01-01").await;

    // popular: 3 comments averaging 2; loved and liked: 2 comments each
    for (author, rating) in [("u1", 2), ("u2", 2), ("u3", 2)] {
        post_test_comment(pool, popular, author, rating).await;
    }
    for (author, rating) in [("u1", 5), ("u2", 5)] {
        post_test_comment(pool, loved, author, rating).await;
    }
    for (author, rating) in [("u1", 4), ("u2", 3)] {
        post_test_comment(pool, liked, author, rating).await;
    }

    let order: Vec<i64> = ratings::get_all(pool)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.album_id)
        .collect();

    assert_eq!(order, vec![popular, loved, liked, ignored]);
}

#[tokio::test]
async fn test_top_rated_orders_by_average_and_caps_at_ten() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Cluster").await;
    let mut albums = Vec::new();
    for i in 0..12 {
        let album = create_test_album(pool, &format!("Zuckerzeit {i}"), artist, "1974-01-01").await;
        // Ratings 1..=5 cycling, so several albums share an average
        post_test_comment(pool, album, "critic", (i % 5) + 1).await;
        albums.push(album);
    }

    let top = ratings::top_rated(pool, TOP_RATED_LIMIT).await.unwrap();

    assert_eq!(top.len(), 10);
    assert!(top
        .windows(2)
        .all(|pair| pair[0].average_rating >= pair[1].average_rating));
    assert!((top[0].average_rating - 5.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_search_matches_title_or_artist_case_insensitively() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let kraftwerk = create_test_artist(pool, "Kraftwerk").await;
    let harmonia = create_test_artist(pool, "Harmonia").await;
    let autobahn = create_test_album(pool, "Autobahn", kraftwerk, "1974-11-01").await;
    let musik = create_test_album(pool, "Musik von Harmonia", harmonia, "1974-01-01").await;
    let deluxe = create_test_album(pool, "Deluxe", harmonia, "1975-01-01").await;
    post_test_comment(pool, deluxe, "sam", 5).await;

    let by_title: Vec<i64> = ratings::search(pool, "AUTOBAHN")
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.album_id)
        .collect();
    assert_eq!(by_title, vec![autobahn]);

    let by_artist: Vec<i64> = ratings::search(pool, "harmon")
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.album_id)
        .collect();
    // Reviewed album first, then the unreviewed one
    assert_eq!(by_artist, vec![deluxe, musik]);

    let everything = ratings::search(pool, "").await.unwrap();
    assert_eq!(everything.len(), 3);
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "Percent").await;
    create_test_album(pool, "100% Pure", artist, "2010-01-01").await;
    create_test_album(pool, "1000 Pure", artist, "2011-01-01").await;

    let hits = ratings::search(pool, "100%").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "100% Pure");

    let none = ratings::search(pool, "_").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let bjork = create_test_artist(pool, "Björk").await;
    let homogenic = create_test_album(pool, "Homogenic", bjork, "1997-09-22").await;
    let sigur = create_test_artist(pool, "Sigur Rós").await;
    let agaetis = create_test_album(pool, "Ágætis byrjun", sigur, "1999-06-12").await;

    for term in ["BJÖRK", "björk", "Björk", "jör"] {
        let hits = ratings::search(pool, term).await.unwrap();
        assert_eq!(hits.len(), 1, "{term:?} should find one album");
        assert_eq!(hits[0].album_id, homogenic);
    }

    let hits = ratings::search(pool, "ÁGÆTIS").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].album_id, agaetis);

    let hits = ratings::search(pool, "RÓS").await.unwrap();
    assert_eq!(hits[0].album_id, agaetis);
}

#[tokio::test]
async fn test_end_to_end_average_of_two_four_four() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let artist = create_test_artist(pool, "A").await;
    let album = create_test_album(pool, "X", artist, "2024-01-15").await;
    for (author, rating) in [("one", 2), ("two", 4), ("three", 4)] {
        post_test_comment(pool, album, author, rating).await;
    }

    let top = ratings::top_rated(pool, TOP_RATED_LIMIT).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].total_comments, 3);
    assert!((top[0].average_rating - 10.0 / 3.0).abs() < 1e-9);
}
