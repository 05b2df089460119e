//! Show rows, keyed by the remote provider id. Descriptive fields are
//! refreshed on conflict: the provider is authoritative for shows.

use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowRow {
    pub id: i64,
    pub tmdb_id: i64,
    pub name: String,
    pub backdrop_path: String,
    pub overview: String,
}

/// Upsert a show by tmdb_id, refreshing name/backdrop/overview. Returns the
/// row id.
pub async fn upsert(
    pool: &SqlitePool,
    tmdb_id: i64,
    name: &str,
    backdrop_path: &str,
    overview: &str,
) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO show (tmdb_id, name, backdrop_path, overview) VALUES (?, ?, ?, ?) \
         ON CONFLICT(tmdb_id) DO UPDATE SET \
             name = excluded.name, \
             backdrop_path = excluded.backdrop_path, \
             overview = excluded.overview \
         RETURNING id",
    )
    .bind(tmdb_id)
    .bind(name)
    .bind(backdrop_path)
    .bind(overview)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn get_by_tmdb_id(
    pool: &SqlitePool,
    tmdb_id: i64,
) -> Result<Option<ShowRow>, sqlx::Error> {
    let row: Option<(i64, i64, String, String, String)> = sqlx::query_as(
        "SELECT id, tmdb_id, name, backdrop_path, overview FROM show WHERE tmdb_id = ?",
    )
    .bind(tmdb_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, tmdb_id, name, backdrop_path, overview)| ShowRow {
        id,
        tmdb_id,
        name,
        backdrop_path,
        overview,
    }))
}
