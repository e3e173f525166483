//! Transcription file detection and decoding.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

/// File name prefix written by the transcription tool.
pub const TRANSCRIPTION_PREFIX: &str = "transcricao-paginas-";

/// File extension of transcription files.
pub const TRANSCRIPTION_EXTENSION: &str = "md";

static PAGE_RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"paginas-(\d+)-(\d+)").expect("valid page range regex"));

/// Page range encoded in a transcription file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    /// First page (as written in the file name)
    pub start: u32,
    /// Last page (as written in the file name)
    pub end: u32,
}

impl PageRange {
    /// Extract the range from a name like `transcricao-paginas-21-40.md`.
    ///
    /// Returns `None` when the name carries no range or the numbers overflow.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let caps = PAGE_RANGE_REGEX.captures(name)?;
        let start = caps[1].parse().ok()?;
        let end = caps[2].parse().ok()?;
        Some(Self { start, end })
    }

    /// Number of pages covered, counting both ends.
    ///
    /// Widened to `u64` so the full `u32` span (`0-4294967295`) still fits.
    pub fn total(&self) -> u64 {
        u64::from(self.end.saturating_sub(self.start)) + 1
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: &PageRange) -> PageRange {
        PageRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl std::fmt::Display for PageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Check whether a path follows the transcription naming convention.
///
/// # Arguments
/// * `path` - Path to check
/// * `prefix` - Required file name prefix
pub fn is_transcription_file<P: AsRef<Path>>(path: P, prefix: &str) -> bool {
    let path = path.as_ref();
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(TRANSCRIPTION_EXTENSION));
    let has_prefix = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(prefix));
    has_extension && has_prefix
}

/// Decode raw file bytes as UTF-8 text, dropping a leading byte order mark.
///
/// # Returns
/// * `Ok(String)` with the decoded text
/// * `Err(Error::Decode)` if the bytes are not valid UTF-8
pub fn decode_text(bytes: Vec<u8>, path: &Path) -> Result<String> {
    let mut text = String::from_utf8(bytes).map_err(|_| Error::Decode(path.to_path_buf()))?;
    if text.starts_with('\u{FEFF}') {
        text.drain(..'\u{FEFF}'.len_utf8());
    }
    Ok(text)
}

/// Read and decode a transcription file.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    decode_text(bytes, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_range_from_file_name() {
        let range = PageRange::from_file_name("transcricao-paginas-21-40.md").unwrap();
        assert_eq!(range, PageRange { start: 21, end: 40 });
        assert_eq!(range.total(), 20);
        assert_eq!(range.to_string(), "21-40");
    }

    #[test]
    fn test_page_range_missing() {
        assert!(PageRange::from_file_name("capitulo-1.md").is_none());
        assert!(PageRange::from_file_name("paginas-x-2.md").is_none());
    }

    #[test]
    fn test_page_range_inverted_total() {
        let range = PageRange { start: 40, end: 21 };
        assert_eq!(range.total(), 1);
    }

    #[test]
    fn test_page_range_widest_total() {
        let range = PageRange::from_file_name("transcricao-paginas-0-4294967295.md").unwrap();
        assert_eq!(range.total(), 4_294_967_296);
    }

    #[test]
    fn test_page_range_union() {
        let a = PageRange { start: 21, end: 40 };
        let b = PageRange { start: 1, end: 20 };
        assert_eq!(a.union(&b), PageRange { start: 1, end: 40 });
    }

    #[test]
    fn test_is_transcription_file() {
        assert!(is_transcription_file(
            "livro/transcricao-paginas-1-20.md",
            TRANSCRIPTION_PREFIX
        ));
        assert!(is_transcription_file(
            "transcricao-paginas-1-20.MD",
            TRANSCRIPTION_PREFIX
        ));
        assert!(!is_transcription_file(
            "transcricao-paginas-1-20.txt",
            TRANSCRIPTION_PREFIX
        ));
        assert!(!is_transcription_file("notas.md", TRANSCRIPTION_PREFIX));
    }

    #[test]
    fn test_decode_text_strips_bom() {
        let bytes = "\u{FEFF}PARTE UM".as_bytes().to_vec();
        let text = decode_text(bytes, Path::new("a.md")).unwrap();
        assert_eq!(text, "PARTE UM");
    }

    #[test]
    fn test_decode_text_invalid_utf8() {
        let result = decode_text(vec![0xFF, 0xFE, 0x41], Path::new("quebrado.md"));
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
