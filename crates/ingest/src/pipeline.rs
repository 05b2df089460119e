//! Pipeline orchestrator.
//!
//! Walks the source tree and drives each file through the stages in a fixed
//! order, one file at a time: transcode, thumbnail, then (gated by the record
//! probe) content hash, metadata enrichment, and persistence. Every stage is
//! gated by its artifact probe, so a re-run resumes from the first incomplete
//! stage. Failures are contained at the file boundary and never halt the
//! walk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};

use reelvault_core::{FileOutcome, StageKind};
use reelvault_metadata::enrich::{enrich_episode, enrich_movie};
use reelvault_metadata::provider::MetadataProvider;
use reelvault_scanner::parser::{self, ParsedMedia};
use reelvault_scanner::{identity, moviehash, walk};
use reelvault_transcoder::encode::{self, EncodeJob};
use reelvault_transcoder::{TranscoderConfig, thumbnail};

use crate::persist::{self, EpisodeRecord, IngestRecord, MovieRecord};
use crate::probe;
use crate::sidecar;

/// Where metadata records live. Store-backed deployments supersede the JSON
/// sidecar; filesystem-only deployments write `<id>.json` instead.
pub enum RecordStore {
    Db(SqlitePool),
    Sidecar,
}

/// A stage error scoped to one file.
#[derive(Debug, thiserror::Error)]
#[error("{stage} stage: {message}")]
pub struct StageError {
    pub stage: StageKind,
    pub message: String,
}

impl StageError {
    fn new(stage: StageKind, err: impl std::fmt::Display) -> Self {
        Self {
            stage,
            message: err.to_string(),
        }
    }
}

/// Tally of per-file outcomes for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub persisted: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct Pipeline {
    pub target_dir: PathBuf,
    /// Extension of the transcoded artifact, e.g. "mp4".
    pub video_ext: String,
    pub transcoder: TranscoderConfig,
    /// Remote metadata provider; `None` means identity-only records.
    pub provider: Option<Arc<dyn MetadataProvider>>,
    pub store: RecordStore,
}

impl Pipeline {
    /// Walk `source_root` and process every media file sequentially. Always
    /// completes the walk; per-file outcomes are tallied in the report.
    pub async fn run(&self, source_root: &Path) -> RunReport {
        let files = walk::walk_media_dir(source_root);
        info!(root = %source_root.display(), files = files.len(), "source walk complete");

        let mut report = RunReport::default();
        for file in &files {
            match self.process_file(file).await {
                FileOutcome::Persisted => report.persisted += 1,
                FileOutcome::Skipped => report.skipped += 1,
                FileOutcome::Failed => report.failed += 1,
            }
        }
        report
    }

    /// Process one file to a terminal outcome. This is the failure boundary:
    /// no stage error escapes to the outer loop.
    pub async fn process_file(&self, source: &Path) -> FileOutcome {
        info!(file = %source.display(), "processing");
        match self.run_stages(source).await {
            Ok(outcome) => {
                info!(file = %source.display(), outcome = %outcome, "done");
                outcome
            }
            Err(e) => {
                error!(file = %source.display(), stage = %e.stage, error = %e.message, "file failed");
                FileOutcome::Failed
            }
        }
    }

    async fn run_stages(&self, source: &Path) -> Result<FileOutcome, StageError> {
        let base_id = identity::base_id(source);
        let video_out = self.target_dir.join(format!("{base_id}.{}", self.video_ext));
        let thumb_out = self.target_dir.join(format!("{base_id}.jpg"));

        let mut did_work = false;
        let mut thumbnail_err: Option<StageError> = None;

        // Transcode: the one unrecoverable stage. A failure here aborts the
        // file before any state is written for it.
        if probe::artifact_exists(&video_out) {
            debug!(artifact = %video_out.display(), "transcode present, skipping");
        } else {
            let job = EncodeJob {
                input: source.to_path_buf(),
                output: video_out.clone(),
            };
            encode::transcode(&self.transcoder, &job)
                .await
                .map_err(|e| StageError::new(StageKind::Transcode, e))?;
            did_work = true;
        }

        // Thumbnail: independent of both transcode and metadata. A failure is
        // held back and reported after the other stages have run.
        if probe::artifact_exists(&thumb_out) {
            debug!(artifact = %thumb_out.display(), "thumbnail present, skipping");
        } else {
            match thumbnail::extract_thumbnail(&self.transcoder, source, &thumb_out).await {
                Ok(()) => did_work = true,
                Err(e) => {
                    warn!(file = %source.display(), error = %e, "thumbnail extraction failed");
                    thumbnail_err = Some(StageError::new(StageKind::Thumbnail, e));
                }
            }
        }

        // Record: hash + enrichment + persistence, all gated by one probe so
        // already-enriched files never repeat remote lookups.
        if self.record_exists(&base_id).await? {
            debug!(id = %base_id, "record present, skipping enrichment");
        } else {
            let hash = moviehash::compute(source)
                .map_err(|e| StageError::new(StageKind::Identity, e))?;
            let record = self.build_record(source, &base_id, hash).await;
            self.persist(&record).await?;
            did_work = true;
        }

        if let Some(e) = thumbnail_err {
            return Err(e);
        }
        Ok(if did_work {
            FileOutcome::Persisted
        } else {
            FileOutcome::Skipped
        })
    }

    async fn record_exists(&self, base_id: &str) -> Result<bool, StageError> {
        match &self.store {
            RecordStore::Db(pool) => reelvault_db::repo::videos::exists(pool, base_id)
                .await
                .map_err(|e| StageError::new(StageKind::Persist, e)),
            RecordStore::Sidecar => {
                Ok(probe::artifact_exists(&sidecar::sidecar_path(&self.target_dir, base_id)))
            }
        }
    }

    /// Classify the file and enrich it via the provider. Never fails:
    /// lookup errors degrade to identity-only or locally parsed data.
    async fn build_record(
        &self,
        source: &Path,
        base_id: &str,
        hash: moviehash::MovieHash,
    ) -> IngestRecord {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut record = IngestRecord {
            filename: base_id.to_string(),
            moviehash: hash.hash,
            moviebytesize: hash.size_bytes,
            episode: None,
            movie: None,
        };

        match parser::parse_filename(&name) {
            ParsedMedia::Episode(parsed) => {
                let matched = match &self.provider {
                    Some(p) => {
                        enrich_episode(p.as_ref(), &parsed.show_title, parsed.season, parsed.episode)
                            .await
                    }
                    None => None,
                };
                record.episode = Some(EpisodeRecord { parsed, matched });
            }
            ParsedMedia::Movie(parsed) => {
                let matched = match &self.provider {
                    Some(p) => enrich_movie(p.as_ref(), &parsed.title, parsed.year).await,
                    None => None,
                };
                record.movie = Some(MovieRecord { parsed, matched });
            }
        }

        record
    }

    async fn persist(&self, record: &IngestRecord) -> Result<(), StageError> {
        match &self.store {
            RecordStore::Db(pool) => persist::persist_record(pool, record)
                .await
                .map_err(|e| StageError::new(StageKind::Persist, e)),
            RecordStore::Sidecar => sidecar::write(&self.target_dir, record)
                .map_err(|e| StageError::new(StageKind::Persist, e)),
        }
    }
}
