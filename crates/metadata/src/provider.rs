use crate::{EpisodeData, MetadataError, MovieData, ShowData};

/// A remote metadata provider, consumed as read-only lookups.
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Search for a TV show by name. Results are ordered by provider
    /// relevance; the first result is treated as authoritative.
    async fn search_show(&self, query: &str) -> Result<Vec<ShowData>, MetadataError>;

    /// Fetch descriptive fields for a specific season/episode of a show.
    async fn get_episode(
        &self,
        show_tmdb_id: i64,
        season: u32,
        episode: u32,
    ) -> Result<EpisodeData, MetadataError>;

    /// Search for a movie by title and optional release year.
    async fn search_movie(
        &self,
        title: &str,
        year: Option<u16>,
    ) -> Result<Vec<MovieData>, MetadataError>;
}
