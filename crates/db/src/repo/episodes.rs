//! Episode rows: at most one per video. Conflict on `video` is a no-op —
//! first write wins, the row is never refreshed afterwards. (Shows refresh
//! on every run; this asymmetry is the documented behavior and is kept
//! deliberately.)

use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRow {
    pub id: i64,
    pub video: i64,
    pub show: i64,
    pub name: String,
    pub episode: i64,
    pub season: i64,
    pub still_path: String,
}

/// Insert an episode for a video; no-op if one already exists.
pub async fn insert(
    pool: &SqlitePool,
    video_id: i64,
    show_id: i64,
    name: &str,
    episode: i64,
    season: i64,
    still_path: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO episode (video, show, name, episode, season, still_path) \
         VALUES (?, ?, ?, ?, ?, ?) \
         ON CONFLICT(video) DO NOTHING",
    )
    .bind(video_id)
    .bind(show_id)
    .bind(name)
    .bind(episode)
    .bind(season)
    .bind(still_path)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_by_video(
    pool: &SqlitePool,
    video_id: i64,
) -> Result<Option<EpisodeRow>, sqlx::Error> {
    let row: Option<(i64, i64, i64, String, i64, i64, String)> = sqlx::query_as(
        "SELECT id, video, show, name, episode, season, still_path \
         FROM episode WHERE video = ?",
    )
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, video, show, name, episode, season, still_path)| EpisodeRow {
        id,
        video,
        show,
        name,
        episode,
        season,
        still_path,
    }))
}
