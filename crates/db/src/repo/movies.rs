//! Movie rows: at most one per video, first-write-wins like episodes.

use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    pub id: i64,
    pub video: i64,
    pub title: String,
    pub backdrop_path: String,
}

/// Insert a movie for a video; no-op if one already exists.
pub async fn insert(
    pool: &SqlitePool,
    video_id: i64,
    title: &str,
    backdrop_path: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO movie (video, title, backdrop_path) VALUES (?, ?, ?) \
         ON CONFLICT(video) DO NOTHING",
    )
    .bind(video_id)
    .bind(title)
    .bind(backdrop_path)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_by_video(
    pool: &SqlitePool,
    video_id: i64,
) -> Result<Option<MovieRow>, sqlx::Error> {
    let row: Option<(i64, i64, String, String)> =
        sqlx::query_as("SELECT id, video, title, backdrop_path FROM movie WHERE video = ?")
            .bind(video_id)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(id, video, title, backdrop_path)| MovieRow {
        id,
        video,
        title,
        backdrop_path,
    }))
}
