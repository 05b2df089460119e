use std::path::{Path, PathBuf};
use tracing::debug;

use crate::parser;

/// Walk a directory recursively and collect media files, skipping hidden
/// entries and known junk directories. Order follows the directory walk and
/// is not otherwise significant.
pub fn walk_media_dir(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_recursive(root, &mut files);
    files
}

fn walk_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "cannot read directory");
            return;
        }
    };

    for entry in read_dir.flatten() {
        let path = entry.path();
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        if name.starts_with('.') {
            debug!(path = %path.display(), "skipping hidden entry");
            continue;
        }

        if path.is_dir() {
            // Skip known junk directories
            if name == "@eaDir" || name == "#recycle" || name == ".Trash" {
                continue;
            }
            walk_recursive(&path, files);
        } else if parser::is_media_file(&name) {
            files.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_only_media_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("Show Name/Season 1")).unwrap();
        std::fs::write(root.join("Movie.Title.2019.mkv"), b"x").unwrap();
        std::fs::write(root.join("Show Name/Season 1/Show.Name.S01E01.mp4"), b"x").unwrap();
        std::fs::write(root.join("Show Name/poster.jpg"), b"x").unwrap();
        std::fs::write(root.join("notes.txt"), b"x").unwrap();
        std::fs::write(root.join(".hidden.mkv"), b"x").unwrap();

        let mut found = walk_media_dir(root);
        found.sort();
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("Movie.Title.2019.mkv"));
        assert!(found[1].ends_with("Show.Name.S01E01.mp4"));
    }

    #[test]
    fn unreadable_root_yields_empty() {
        let found = walk_media_dir(Path::new("/no/such/dir"));
        assert!(found.is_empty());
    }
}
