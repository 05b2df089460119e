//! Hardware encoder detection.
//!
//! Probes the engine once at startup with `ffmpeg -encoders`; the pipeline
//! picks the best available encoder and falls back to software when an
//! encode attempt fails anyway.

use std::path::Path;

use tracing::info;

/// Supported hardware H.264 encode paths, in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HwEncoder {
    Nvenc,
    Qsv,
    Vaapi,
    VideoToolbox,
}

impl HwEncoder {
    pub fn codec(self) -> &'static str {
        match self {
            Self::Nvenc => "h264_nvenc",
            Self::Qsv => "h264_qsv",
            Self::Vaapi => "h264_vaapi",
            Self::VideoToolbox => "h264_videotoolbox",
        }
    }
}

/// Detect the best available hardware encoder, or `None` for CPU-only.
pub async fn detect(ffmpeg_path: &Path) -> Option<HwEncoder> {
    let encoders = match list_encoders(ffmpeg_path).await {
        Ok(s) => s,
        Err(e) => {
            info!(error = %e, "could not query engine encoders, assuming CPU-only");
            return None;
        }
    };

    let best = [
        HwEncoder::Nvenc,
        HwEncoder::Qsv,
        HwEncoder::Vaapi,
        HwEncoder::VideoToolbox,
    ]
    .into_iter()
    .find(|hw| encoders.contains(hw.codec()));

    info!(encoder = ?best, "hardware encoder detection complete");
    best
}

async fn list_encoders(ffmpeg_path: &Path) -> Result<String, String> {
    let output = tokio::process::Command::new(ffmpeg_path)
        .args(["-hide_banner", "-encoders"])
        .output()
        .await
        .map_err(|e| format!("spawn ffmpeg: {e}"))?;

    if !output.status.success() {
        return Err("ffmpeg -encoders failed".into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
