//! Persistence stage.
//!
//! Writes the video identity and derived metadata through the conflict-aware
//! repo upserts, in a fixed order: video first (refresh moviehash, returning
//! its id), then show + episode or movie. Episode and movie rows are
//! first-write-wins; the caller probes for an existing record before invoking
//! this stage at all, so already-enriched files never repeat remote lookups.

use sqlx::SqlitePool;

use reelvault_db::repo::{episodes, movies, shows, videos};
use reelvault_metadata::MovieData;
use reelvault_metadata::enrich::EpisodeMatch;
use reelvault_scanner::parser::{EpisodeInfo, MovieInfo};

/// Everything the persistence stage needs for one file: identity plus
/// whichever descriptors enrichment resolved. Absence of metadata is not a
/// failure; the video is persisted with identity only.
#[derive(Debug, Clone)]
pub struct IngestRecord {
    /// Base identifier (filename with media extension stripped).
    pub filename: String,
    pub moviehash: String,
    pub moviebytesize: u64,
    pub episode: Option<EpisodeRecord>,
    pub movie: Option<MovieRecord>,
}

/// Episode classification plus the provider match, when one was found.
#[derive(Debug, Clone)]
pub struct EpisodeRecord {
    pub parsed: EpisodeInfo,
    pub matched: Option<EpisodeMatch>,
}

/// Movie classification plus the provider match, when one was found.
#[derive(Debug, Clone)]
pub struct MovieRecord {
    pub parsed: MovieInfo,
    pub matched: Option<MovieData>,
}

/// Upsert the record into the relational store. Safe to re-run: video and
/// show refresh on conflict, episode and movie are no-ops on conflict.
pub async fn persist_record(pool: &SqlitePool, record: &IngestRecord) -> Result<(), sqlx::Error> {
    let video_id = videos::upsert(pool, &record.filename, &record.moviehash).await?;

    if let Some(ep) = &record.episode {
        // An episode row needs a resolved show; without one the video keeps
        // identity only and a later run may enrich it.
        if let Some(matched) = &ep.matched {
            let show_id = shows::upsert(
                pool,
                matched.show.tmdb_id,
                &matched.show.name,
                &matched.show.backdrop_path,
                &matched.show.overview,
            )
            .await?;
            episodes::insert(
                pool,
                video_id,
                show_id,
                &matched.episode.name,
                ep.parsed.episode as i64,
                ep.parsed.season as i64,
                &matched.episode.still_path,
            )
            .await?;
        }
    } else if let Some(movie) = &record.movie {
        let (title, backdrop_path) = match &movie.matched {
            Some(m) => (m.title.as_str(), m.backdrop_path.as_str()),
            None => (movie.parsed.title.as_str(), ""),
        };
        movies::insert(pool, video_id, title, backdrop_path).await?;
    }

    Ok(())
}
