//! Video identity rows. `filename` is the natural key: re-running the
//! pipeline against the same source file resolves to the same row, with
//! `moviehash` refreshed on conflict.

use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRow {
    pub id: i64,
    pub filename: String,
    pub moviehash: String,
}

/// Upsert a video identity by filename, refreshing the moviehash. Returns
/// the row id (original id on conflict, never a duplicate).
pub async fn upsert(
    pool: &SqlitePool,
    filename: &str,
    moviehash: &str,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO videos (filename, moviehash) VALUES (?, ?) \
         ON CONFLICT(filename) DO UPDATE SET moviehash = excluded.moviehash \
         RETURNING id",
    )
    .bind(filename)
    .bind(moviehash)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Does a persisted record already exist for this filename? This is the
/// store-side skip-probe.
pub async fn exists(pool: &SqlitePool, filename: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM videos WHERE filename = ?")
        .bind(filename)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn get_by_filename(
    pool: &SqlitePool,
    filename: &str,
) -> Result<Option<VideoRow>, sqlx::Error> {
    let row: Option<(i64, String, String)> =
        sqlx::query_as("SELECT id, filename, moviehash FROM videos WHERE filename = ?")
            .bind(filename)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(id, filename, moviehash)| VideoRow {
        id,
        filename,
        moviehash,
    }))
}
