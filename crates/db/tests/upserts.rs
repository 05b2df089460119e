use sqlx::SqlitePool;

use reelvault_db::repo::{episodes, movies, shows, videos};

async fn test_pool() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let pool = reelvault_db::connect(db_path.to_str().unwrap()).await.unwrap();
    reelvault_db::migrate::run(&pool).await.unwrap();
    (dir, pool)
}

#[tokio::test]
async fn video_upsert_refreshes_moviehash_in_place() {
    let (_dir, pool) = test_pool().await;

    let first = videos::upsert(&pool, "Movie.Title.2019", "00000000aaaaaaaa")
        .await
        .unwrap();
    let second = videos::upsert(&pool, "Movie.Title.2019", "00000000bbbbbbbb")
        .await
        .unwrap();

    assert_eq!(first, second, "conflict must return the original id");

    let row = videos::get_by_filename(&pool, "Movie.Title.2019")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.moviehash, "00000000bbbbbbbb");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1, "no duplicate rows");
}

#[tokio::test]
async fn video_exists_probe() {
    let (_dir, pool) = test_pool().await;
    assert!(!videos::exists(&pool, "Some.File").await.unwrap());

    videos::upsert(&pool, "Some.File", "abc").await.unwrap();
    assert!(videos::exists(&pool, "Some.File").await.unwrap());
}

#[tokio::test]
async fn show_upsert_refreshes_descriptive_fields() {
    let (_dir, pool) = test_pool().await;

    let first = shows::upsert(&pool, 1396, "Breaking Bad", "/old.jpg", "old overview")
        .await
        .unwrap();
    let second = shows::upsert(&pool, 1396, "Breaking Bad", "/new.jpg", "new overview")
        .await
        .unwrap();
    assert_eq!(first, second);

    let row = shows::get_by_tmdb_id(&pool, 1396).await.unwrap().unwrap();
    assert_eq!(row.backdrop_path, "/new.jpg");
    assert_eq!(row.overview, "new overview");
}

#[tokio::test]
async fn episode_insert_is_first_write_wins() {
    let (_dir, pool) = test_pool().await;

    let video_id = videos::upsert(&pool, "Show.S01E01", "hash").await.unwrap();
    let show_id = shows::upsert(&pool, 7, "Show", "", "").await.unwrap();

    episodes::insert(&pool, video_id, show_id, "Pilot", 1, 1, "/pilot.jpg")
        .await
        .unwrap();
    // Second insert with different data must be a no-op.
    episodes::insert(&pool, video_id, show_id, "Renamed", 1, 1, "/other.jpg")
        .await
        .unwrap();

    let row = episodes::get_by_video(&pool, video_id).await.unwrap().unwrap();
    assert_eq!(row.name, "Pilot");
    assert_eq!(row.still_path, "/pilot.jpg");
}

#[tokio::test]
async fn movie_insert_is_first_write_wins() {
    let (_dir, pool) = test_pool().await;

    let video_id = videos::upsert(&pool, "Movie.2019", "hash").await.unwrap();

    movies::insert(&pool, video_id, "Original Title", "/m.jpg")
        .await
        .unwrap();
    movies::insert(&pool, video_id, "Refreshed Title", "/n.jpg")
        .await
        .unwrap();

    let row = movies::get_by_video(&pool, video_id).await.unwrap().unwrap();
    assert_eq!(row.title, "Original Title");
    assert_eq!(row.backdrop_path, "/m.jpg");
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let (_dir, pool) = test_pool().await;
    reelvault_db::migrate::run(&pool).await.unwrap();

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _migrations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}
