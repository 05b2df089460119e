pub mod encode;
pub mod hwaccel;
pub mod thumbnail;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("engine failed: {0}")]
    EngineFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transcoding engine configuration shared by the encode and thumbnail
/// stages.
#[derive(Debug, Clone)]
pub struct TranscoderConfig {
    pub ffmpeg_path: PathBuf,
    /// Hardware encode path, detected at startup. `None` means software only.
    pub hw_encoder: Option<hwaccel::HwEncoder>,
    /// Cap the transcoded duration, for test/preview runs.
    pub duration_cap_secs: Option<u32>,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            hw_encoder: None,
            duration_cap_secs: None,
        }
    }
}
