pub mod enrich;
pub mod provider;
pub mod tmdb;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
}

/// Show descriptor from a remote provider. Refreshed in the store on every
/// run that resolves it.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShowData {
    pub tmdb_id: i64,
    pub name: String,
    pub backdrop_path: String,
    pub overview: String,
}

/// Episode descriptor for a specific season/episode of a show.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EpisodeData {
    pub name: String,
    pub still_path: String,
}

/// Movie descriptor from a remote provider.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MovieData {
    pub title: String,
    pub backdrop_path: String,
}
