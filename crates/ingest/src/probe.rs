//! Artifact skip-probe.
//!
//! Existence of an artifact is the sole gate for skip logic: a stage that
//! finds its artifact present must not run. This is what makes the pipeline
//! safely re-runnable after a crash, a partial batch, or an incremental
//! re-scan of a growing tree.

use std::path::Path;

/// Does a filesystem artifact already exist at this path?
pub fn artifact_exists(path: &Path) -> bool {
    path.is_file()
}
