//! Transcode stage: external engine invocation.
//!
//! The engine's stdout/stderr stream through to the parent process for
//! observability. A non-zero exit or spawn error removes any partial
//! destination file so a later run retries the file cleanly.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::{info, warn};

use crate::hwaccel::HwEncoder;
use crate::{TranscodeError, TranscoderConfig};

/// One transcode invocation: source file in, streaming-friendly file out.
#[derive(Debug, Clone)]
pub struct EncodeJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Transcode a source file. Tries the configured hardware encode path first
/// and retries once with the software path if the hardware attempt fails.
pub async fn transcode(cfg: &TranscoderConfig, job: &EncodeJob) -> Result<(), TranscodeError> {
    if let Some(hw) = cfg.hw_encoder {
        let args = encode_args(&job.input, &job.output, Some(hw), cfg.duration_cap_secs);
        match run_engine(&cfg.ffmpeg_path, &args, &job.output).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                warn!(
                    input = %job.input.display(),
                    encoder = hw.codec(),
                    error = %e,
                    "hardware encode failed, retrying with software path"
                );
            }
        }
    }

    let args = encode_args(&job.input, &job.output, None, cfg.duration_cap_secs);
    run_engine(&cfg.ffmpeg_path, &args, &job.output).await
}

/// Build the engine argument list for an encode.
pub fn encode_args(
    input: &Path,
    output: &Path,
    hw: Option<HwEncoder>,
    duration_cap_secs: Option<u32>,
) -> Vec<String> {
    let mut args: Vec<String> = vec!["-hide_banner".into(), "-y".into()];

    if let Some(hw) = hw {
        match hw {
            HwEncoder::Nvenc => args.extend(["-hwaccel".into(), "cuda".into()]),
            HwEncoder::Qsv => args.extend(["-hwaccel".into(), "qsv".into()]),
            HwEncoder::Vaapi => args.extend([
                "-hwaccel".into(),
                "vaapi".into(),
                "-hwaccel_output_format".into(),
                "vaapi".into(),
                "-vaapi_device".into(),
                "/dev/dri/renderD128".into(),
            ]),
            HwEncoder::VideoToolbox => args.extend(["-hwaccel".into(), "videotoolbox".into()]),
        }
    }

    args.extend(["-i".into(), input.to_string_lossy().into_owned()]);

    match hw {
        Some(hw) => args.extend(["-c:v".into(), hw.codec().into()]),
        None => args.extend([
            "-c:v".into(),
            "libx264".into(),
            "-preset".into(),
            "veryfast".into(),
            "-crf".into(),
            "23".into(),
        ]),
    }

    args.extend(["-c:a".into(), "aac".into(), "-b:a".into(), "128k".into()]);
    args.extend(["-movflags".into(), "+faststart".into()]);

    if let Some(cap) = duration_cap_secs {
        args.extend(["-t".into(), cap.to_string()]);
    }

    args.push(output.to_string_lossy().into_owned());
    args
}

/// Run the engine to produce `output`. Success is the process exiting zero;
/// any failure discards a partially written output file.
pub(crate) async fn run_engine(
    engine: &Path,
    args: &[String],
    output: &Path,
) -> Result<(), TranscodeError> {
    info!(engine = %engine.display(), ?args, "spawning transcoding engine");

    let status = tokio::process::Command::new(engine)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await;

    match status {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => {
            discard_partial(output);
            Err(TranscodeError::EngineFailed(format!("engine exited with {s}")))
        }
        Err(e) => {
            discard_partial(output);
            Err(TranscodeError::EngineFailed(format!("spawn engine: {e}")))
        }
    }
}

fn discard_partial(output: &Path) {
    if output.exists() {
        if let Err(e) = std::fs::remove_file(output) {
            warn!(path = %output.display(), error = %e, "could not remove partial output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn software_args_use_libx264() {
        let args = encode_args(Path::new("/in/a.mkv"), Path::new("/out/a.mp4"), None, None);
        let joined = args.join(" ");
        assert!(joined.contains("-c:v libx264"));
        assert!(joined.contains("-c:a aac"));
        assert!(joined.contains("-movflags +faststart"));
        assert!(joined.ends_with("/out/a.mp4"));
        assert!(!joined.contains("-hwaccel"));
        assert!(!joined.contains("-t"));
    }

    #[test]
    fn hardware_args_select_hw_codec() {
        let args = encode_args(
            Path::new("/in/a.mkv"),
            Path::new("/out/a.mp4"),
            Some(HwEncoder::Nvenc),
            None,
        );
        let joined = args.join(" ");
        assert!(joined.contains("-hwaccel cuda"));
        assert!(joined.contains("-c:v h264_nvenc"));
        assert!(!joined.contains("libx264"));
    }

    #[test]
    fn duration_cap_adds_t_flag() {
        let args = encode_args(Path::new("a.mkv"), Path::new("a.mp4"), None, Some(30));
        let joined = args.join(" ");
        assert!(joined.contains("-t 30"));
    }

    #[tokio::test]
    async fn failed_engine_leaves_no_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp4");
        // Simulate a crash mid-write: the partial file exists before the
        // engine is declared failed.
        std::fs::write(&output, b"partial").unwrap();

        let cfg = TranscoderConfig {
            ffmpeg_path: PathBuf::from("/no/such/ffmpeg"),
            hw_encoder: None,
            duration_cap_secs: None,
        };
        let job = EncodeJob {
            input: dir.path().join("in.mkv"),
            output: output.clone(),
        };

        let result = transcode(&cfg, &job).await;
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
