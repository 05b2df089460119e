//! Base identifier derivation.
//!
//! The base id is the idempotency key for a source file: its file name with
//! the recognized media extension stripped. All artifacts for a file share it
//! (`<id>.mp4`, `<id>.jpg`, `<id>.json`) and it backs the `filename` unique
//! constraint in the store.

use std::path::Path;

use crate::parser::MEDIA_EXTENSIONS;

/// Derive the base identifier for a source file path. Pure, no I/O.
///
/// `Show.Name.S01E01.mkv` → `Show.Name.S01E01`. A file without a recognized
/// media extension keeps its full name.
pub fn base_id(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some((stem, ext)) = name.rsplit_once('.') {
        if !stem.is_empty() && MEDIA_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)) {
            return stem.to_string();
        }
    }
    name
}
