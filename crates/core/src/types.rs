use serde::{Deserialize, Serialize};

/// Pipeline stage, used when reporting which stage a file failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Transcode,
    Thumbnail,
    Identity,
    Metadata,
    Persist,
}

impl StageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transcode => "transcode",
            Self::Thumbnail => "thumbnail",
            Self::Identity => "identity",
            Self::Metadata => "metadata",
            Self::Persist => "persist",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome for one source file in a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    /// At least one stage did work and every artifact is now present.
    Persisted,
    /// Every artifact already existed; nothing to do.
    Skipped,
    /// A stage failed; the file will be retried on the next invocation.
    Failed,
}

impl FileOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Persisted => "persisted",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
