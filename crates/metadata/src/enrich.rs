//! Metadata enrichment with graceful degradation.
//!
//! Every provider failure (network error, empty search, malformed response)
//! degrades to "no data" rather than failing the file: the video is still
//! persisted with identity only.

use tracing::warn;

use crate::provider::MetadataProvider;
use crate::{EpisodeData, MovieData, ShowData};

/// Episode enrichment result: the authoritative show plus whatever episode
/// detail the provider returned. `episode` fields stay empty if the detail
/// lookup failed after the show search succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeMatch {
    pub show: ShowData,
    pub episode: EpisodeData,
}

/// Resolve a parsed episode against the provider. The first show search
/// result wins; `None` means no usable show was found.
pub async fn enrich_episode(
    provider: &dyn MetadataProvider,
    show_title: &str,
    season: u32,
    episode: u32,
) -> Option<EpisodeMatch> {
    let shows = match provider.search_show(show_title).await {
        Ok(shows) => shows,
        Err(e) => {
            warn!(provider = provider.name(), show = show_title, error = %e, "show search failed");
            return None;
        }
    };
    let show = shows.into_iter().next()?;

    let detail = match provider.get_episode(show.tmdb_id, season, episode).await {
        Ok(detail) => detail,
        Err(e) => {
            warn!(
                provider = provider.name(),
                show = %show.name,
                season,
                episode,
                error = %e,
                "episode lookup failed"
            );
            EpisodeData::default()
        }
    };

    Some(EpisodeMatch {
        show,
        episode: detail,
    })
}

/// Resolve a parsed movie against the provider. The first search result
/// wins; `None` means the caller should fall back to the locally parsed
/// title with empty artwork.
pub async fn enrich_movie(
    provider: &dyn MetadataProvider,
    title: &str,
    year: Option<u16>,
) -> Option<MovieData> {
    let movies = match provider.search_movie(title, year).await {
        Ok(movies) => movies,
        Err(e) => {
            warn!(provider = provider.name(), title, error = %e, "movie search failed");
            return None;
        }
    };
    movies.into_iter().next()
}
