//! JSON sidecar records for filesystem-only deployments.
//!
//! When no store is configured, the metadata artifact is `<id>.json` next to
//! the transcode and thumbnail, and its presence is the record skip-probe.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use reelvault_metadata::{EpisodeData, MovieData, ShowData};

use crate::persist::IngestRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidecarRecord {
    pub filename: String,
    pub opensubtitles: OpenSubtitlesIdentity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<SidecarEpisode>,
    #[serde(rename = "showData", skip_serializing_if = "Option::is_none")]
    pub show_data: Option<ShowData>,
    #[serde(rename = "episodeData", skip_serializing_if = "Option::is_none")]
    pub episode_data: Option<EpisodeData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie: Option<SidecarMovie>,
    #[serde(rename = "movieData", skip_serializing_if = "Option::is_none")]
    pub movie_data: Option<MovieData>,
}

/// Content hash + size pair consumed by hash-based subtitle lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSubtitlesIdentity {
    pub moviehash: String,
    pub moviebytesize: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidecarEpisode {
    pub show: String,
    pub season: u32,
    pub episode: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidecarMovie {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl SidecarRecord {
    pub fn from_ingest(record: &IngestRecord) -> Self {
        Self {
            filename: record.filename.clone(),
            opensubtitles: OpenSubtitlesIdentity {
                moviehash: record.moviehash.clone(),
                moviebytesize: record.moviebytesize,
            },
            episode: record.episode.as_ref().map(|ep| SidecarEpisode {
                show: ep.parsed.show_title.clone(),
                season: ep.parsed.season,
                episode: ep.parsed.episode,
            }),
            show_data: record
                .episode
                .as_ref()
                .and_then(|ep| ep.matched.as_ref())
                .map(|m| m.show.clone()),
            episode_data: record
                .episode
                .as_ref()
                .and_then(|ep| ep.matched.as_ref())
                .map(|m| m.episode.clone()),
            movie: record.movie.as_ref().map(|mv| SidecarMovie {
                title: mv.parsed.title.clone(),
                year: mv.parsed.year,
            }),
            movie_data: record.movie.as_ref().and_then(|mv| mv.matched.clone()),
        }
    }
}

/// Sidecar path for a base identifier.
pub fn sidecar_path(target_dir: &Path, base_id: &str) -> PathBuf {
    target_dir.join(format!("{base_id}.json"))
}

/// Write the sidecar record. The write is atomic at file granularity via a
/// temp file + rename, so a crash never leaves a truncated record behind.
pub fn write(target_dir: &Path, record: &IngestRecord) -> std::io::Result<()> {
    let sidecar = SidecarRecord::from_ingest(record);
    let json = serde_json::to_vec_pretty(&sidecar)?;

    let path = sidecar_path(target_dir, &record.filename);
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{EpisodeRecord, MovieRecord};
    use reelvault_metadata::enrich::EpisodeMatch;
    use reelvault_scanner::parser::{EpisodeInfo, MovieInfo};

    fn base_record(filename: &str) -> IngestRecord {
        IngestRecord {
            filename: filename.into(),
            moviehash: "00000000deadbeef".into(),
            moviebytesize: 4096,
            episode: None,
            movie: None,
        }
    }

    #[test]
    fn writes_episode_record_with_show_data() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = base_record("Show.Name.S02E05");
        record.episode = Some(EpisodeRecord {
            parsed: EpisodeInfo {
                show_title: "Show Name".into(),
                season: 2,
                episode: 5,
            },
            matched: Some(EpisodeMatch {
                show: ShowData {
                    tmdb_id: 42,
                    name: "Show Name".into(),
                    backdrop_path: "/b.jpg".into(),
                    overview: "a show".into(),
                },
                episode: EpisodeData {
                    name: "The One".into(),
                    still_path: "/s.jpg".into(),
                },
            }),
        });

        write(dir.path(), &record).unwrap();

        let raw = std::fs::read(sidecar_path(dir.path(), "Show.Name.S02E05")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value["filename"], "Show.Name.S02E05");
        assert_eq!(value["opensubtitles"]["moviehash"], "00000000deadbeef");
        assert_eq!(value["opensubtitles"]["moviebytesize"], 4096);
        assert_eq!(value["episode"]["season"], 2);
        assert_eq!(value["showData"]["tmdb_id"], 42);
        assert_eq!(value["episodeData"]["name"], "The One");
        assert!(value.get("movie").is_none());
    }

    #[test]
    fn unmatched_movie_omits_remote_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = base_record("Movie.Title.2019");
        record.movie = Some(MovieRecord {
            parsed: MovieInfo {
                title: "Movie Title".into(),
                year: Some(2019),
            },
            matched: None,
        });

        write(dir.path(), &record).unwrap();

        let raw = std::fs::read(sidecar_path(dir.path(), "Movie.Title.2019")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value["movie"]["title"], "Movie Title");
        assert_eq!(value["movie"]["year"], 2019);
        assert!(value.get("movieData").is_none());
        assert!(value.get("showData").is_none());
    }

    #[test]
    fn no_tmp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let record = base_record("Plain");
        write(dir.path(), &record).unwrap();
        assert!(sidecar_path(dir.path(), "Plain").exists());
        assert!(!dir.path().join("Plain.json.tmp").exists());
    }
}
