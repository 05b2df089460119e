use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use reelvault_ingest::pipeline::{Pipeline, RecordStore};
use reelvault_metadata::provider::MetadataProvider;
use reelvault_metadata::tmdb::TmdbClient;
use reelvault_transcoder::{TranscoderConfig, hwaccel};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let usage = "usage: reelvault-ingest <source-dir> <target-dir>";
    let source: PathBuf = args.next().context(usage)?.into();
    let target: PathBuf = args.next().context(usage)?.into();
    std::fs::create_dir_all(&target).context("failed to create target dir")?;

    let ffmpeg_path: PathBuf = std::env::var("REELVAULT_FFMPEG")
        .unwrap_or_else(|_| "ffmpeg".to_string())
        .into();
    let video_ext = std::env::var("REELVAULT_VIDEO_EXT").unwrap_or_else(|_| "mp4".to_string());
    let duration_cap_secs = std::env::var("REELVAULT_DURATION_CAP")
        .ok()
        .and_then(|v| v.parse().ok());

    let hw_encoder = if std::env::var("REELVAULT_NO_HWACCEL").is_ok() {
        None
    } else {
        hwaccel::detect(&ffmpeg_path).await
    };

    // Store-backed mode when a database path is configured; otherwise the
    // metadata record is a JSON sidecar next to the other artifacts.
    let store = match std::env::var("REELVAULT_DB") {
        Ok(db_path) => {
            info!(db_path = %db_path, "connecting to database");
            let pool = reelvault_db::connect(&db_path)
                .await
                .context("failed to connect to database")?;
            reelvault_db::migrate::run(&pool)
                .await
                .context("failed to run migrations")?;
            RecordStore::Db(pool)
        }
        Err(_) => {
            info!("no REELVAULT_DB configured, writing JSON sidecars");
            RecordStore::Sidecar
        }
    };

    let provider: Option<Arc<dyn MetadataProvider>> = match std::env::var("TMDB_API_KEY") {
        Ok(key) => Some(Arc::new(TmdbClient::new(key)) as Arc<dyn MetadataProvider>),
        Err(_) => {
            warn!("TMDB_API_KEY not set, records will carry identity only");
            None
        }
    };

    let pipeline = Pipeline {
        target_dir: target,
        video_ext,
        transcoder: TranscoderConfig {
            ffmpeg_path,
            hw_encoder,
            duration_cap_secs,
        },
        provider,
        store,
    };

    let report = pipeline.run(&source).await;
    info!(
        persisted = report.persisted,
        skipped = report.skipped,
        failed = report.failed,
        "ingest walk complete"
    );
    Ok(())
}
