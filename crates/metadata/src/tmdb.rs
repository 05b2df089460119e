//! TMDB (The Movie Database) provider client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use tracing::debug;

use crate::provider::MetadataProvider;
use crate::{EpisodeData, MetadataError, MovieData, ShowData};

const BASE_URL: &str = "https://api.themoviedb.org/3";

pub struct TmdbClient {
    api_key: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, MetadataError> {
        let mut all_params = vec![("api_key", self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{BASE_URL}{path}");
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&all_params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn search_show(&self, query: &str) -> Result<Vec<ShowData>, MetadataError> {
        let data = self.get_json("/search/tv", &[("query", query)]).await?;
        Ok(parse_show_results(&data))
    }

    async fn get_episode(
        &self,
        show_tmdb_id: i64,
        season: u32,
        episode: u32,
    ) -> Result<EpisodeData, MetadataError> {
        let data = self
            .get_json(&format!("/tv/{show_tmdb_id}/season/{season}/episode/{episode}"), &[])
            .await?;
        Ok(parse_episode(&data))
    }

    async fn search_movie(
        &self,
        title: &str,
        year: Option<u16>,
    ) -> Result<Vec<MovieData>, MetadataError> {
        let mut params = vec![("query", title)];
        let year_str = year.map(|y| y.to_string());
        if let Some(ref y) = year_str {
            params.push(("year", y));
        }

        let data = self.get_json("/search/movie", &params).await?;
        Ok(parse_movie_results(&data))
    }
}

fn parse_show_results(data: &serde_json::Value) -> Vec<ShowData> {
    let results = data["results"].as_array().cloned().unwrap_or_default();
    results
        .iter()
        .take(10)
        .map(|r| ShowData {
            tmdb_id: r["id"].as_i64().unwrap_or(0),
            name: r["name"].as_str().unwrap_or("Unknown").to_string(),
            backdrop_path: r["backdrop_path"].as_str().unwrap_or("").to_string(),
            overview: r["overview"].as_str().unwrap_or("").to_string(),
        })
        .collect()
}

fn parse_episode(data: &serde_json::Value) -> EpisodeData {
    EpisodeData {
        name: data["name"].as_str().unwrap_or("").to_string(),
        still_path: data["still_path"].as_str().unwrap_or("").to_string(),
    }
}

fn parse_movie_results(data: &serde_json::Value) -> Vec<MovieData> {
    let results = data["results"].as_array().cloned().unwrap_or_default();
    results
        .iter()
        .take(10)
        .map(|r| MovieData {
            title: r["title"].as_str().unwrap_or("Unknown").to_string(),
            backdrop_path: r["backdrop_path"].as_str().unwrap_or("").to_string(),
        })
        .collect()
}
