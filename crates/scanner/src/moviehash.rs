//! Content-based secondary identity.
//!
//! OpenSubtitles-style movie hash: file size plus wrapping sums of the first
//! and last 64 KiB read as little-endian u64 words. Stable across renames,
//! sensitive to content changes, and compatible with hash-based subtitle
//! lookups. The byte-range parameters are an external-compatibility detail
//! and must not be changed.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

const HASH_WINDOW_BYTES: u64 = 64 * 1024;

/// Content hash and byte size for a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieHash {
    /// 16 lowercase hex digits.
    pub hash: String,
    pub size_bytes: u64,
}

/// Compute the movie hash for a file.
///
/// Files shorter than the 64 KiB window sum their whole content for both the
/// head and the tail window.
pub fn compute(path: &Path) -> std::io::Result<MovieHash> {
    let mut file = File::open(path)?;
    let size = file.metadata()?.len();
    let window = HASH_WINDOW_BYTES.min(size);

    let mut buf = vec![0u8; window as usize];
    let mut acc = size;

    file.read_exact(&mut buf)?;
    acc = acc.wrapping_add(sum_words(&buf));

    file.seek(SeekFrom::Start(size - window))?;
    file.read_exact(&mut buf)?;
    acc = acc.wrapping_add(sum_words(&buf));

    Ok(MovieHash {
        hash: format!("{acc:016x}"),
        size_bytes: size,
    })
}

fn sum_words(buf: &[u8]) -> u64 {
    let mut sum = 0u64;
    let mut chunks = buf.chunks_exact(8);
    for chunk in &mut chunks {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        sum = sum.wrapping_add(u64::from_le_bytes(word));
    }
    let rem = chunks.remainder();
    if !rem.is_empty() {
        let mut word = [0u8; 8];
        word[..rem.len()].copy_from_slice(rem);
        sum = sum.wrapping_add(u64::from_le_bytes(word));
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_content_hashes_to_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zeros.mkv");
        std::fs::write(&path, vec![0u8; 128 * 1024]).unwrap();

        let h = compute(&path).unwrap();
        assert_eq!(h.size_bytes, 128 * 1024);
        assert_eq!(h.hash, format!("{:016x}", 128 * 1024u64));
    }

    #[test]
    fn stable_across_rename() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("original.mkv");
        std::fs::write(&a, b"some video bytes, definitely").unwrap();
        let before = compute(&a).unwrap();

        let b = dir.path().join("renamed.mkv");
        std::fs::rename(&a, &b).unwrap();
        let after = compute(&b).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn sensitive_to_content_change() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.mkv");
        let b = dir.path().join("b.mkv");
        std::fs::write(&a, vec![1u8; 4096]).unwrap();
        std::fs::write(&b, vec![2u8; 4096]).unwrap();

        assert_ne!(compute(&a).unwrap().hash, compute(&b).unwrap().hash);
    }

    #[test]
    fn small_file_uses_whole_content_for_both_windows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.mkv");
        // 16 bytes: two LE words of 0x0101010101010101, counted twice.
        std::fs::write(&path, vec![1u8; 16]).unwrap();

        let word = u64::from_le_bytes([1; 8]);
        let expected = 16u64
            .wrapping_add(word.wrapping_mul(2))
            .wrapping_add(word.wrapping_mul(2));
        let h = compute(&path).unwrap();
        assert_eq!(h.hash, format!("{expected:016x}"));
    }

    #[test]
    fn empty_file_hashes_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mkv");
        std::fs::write(&path, b"").unwrap();

        let h = compute(&path).unwrap();
        assert_eq!(h.hash, "0000000000000000");
        assert_eq!(h.size_bytes, 0);
    }
}
