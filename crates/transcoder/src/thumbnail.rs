//! Thumbnail stage: extract one representative frame.

use std::path::Path;

use crate::encode::run_engine;
use crate::{TranscodeError, TranscoderConfig};

/// Seek offset for the representative frame.
pub const THUMB_SEEK_SECS: u32 = 200;
/// Output resolution, width x height.
pub const THUMB_SCALE: &str = "400:200";

/// Extract a single still frame from the source into `output` (JPEG).
pub async fn extract_thumbnail(
    cfg: &TranscoderConfig,
    input: &Path,
    output: &Path,
) -> Result<(), TranscodeError> {
    let args = thumbnail_args(input, output);
    run_engine(&cfg.ffmpeg_path, &args, output).await
}

/// Build the engine argument list for a thumbnail extraction.
pub fn thumbnail_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        "-hide_banner".into(),
        "-y".into(),
        "-ss".into(),
        THUMB_SEEK_SECS.to_string(),
        "-i".into(),
        input.to_string_lossy().into_owned(),
        "-vframes".into(),
        "1".into(),
        "-vf".into(),
        format!("scale={THUMB_SCALE}"),
        output.to_string_lossy().into_owned(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_args_seek_and_scale() {
        let args = thumbnail_args(Path::new("/in/a.mkv"), Path::new("/out/a.jpg"));
        let joined = args.join(" ");
        assert!(joined.contains("-ss 200"));
        assert!(joined.contains("-vframes 1"));
        assert!(joined.contains("scale=400:200"));
        assert!(joined.ends_with("/out/a.jpg"));
    }

    #[tokio::test]
    async fn failed_extraction_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = TranscoderConfig {
            ffmpeg_path: "/no/such/ffmpeg".into(),
            ..Default::default()
        };
        let result =
            extract_thumbnail(&cfg, &dir.path().join("in.mkv"), &dir.path().join("out.jpg")).await;
        assert!(result.is_err());
    }
}
