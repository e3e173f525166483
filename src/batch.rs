//! Batch processing of transcription directories.
//!
//! Files are discovered by naming convention, parsed independently (in
//! parallel with rayon when enabled) and optionally consolidated into one
//! book document in file-name order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::detect::{is_transcription_file, PageRange, TRANSCRIPTION_PREFIX};
use crate::error::{Error, Result};
use crate::model::{Document, Metadata};
use crate::parser::{build_index, TranscriptParser};
use crate::render::FormatStats;

/// Sub-directory that receives per-file output.
pub const OUTPUT_DIR: &str = "formatadas";

/// Default file name of the consolidated book.
pub const CONSOLIDATED_FILE_NAME: &str = "livro-completo.md";

const OUTPUT_SUFFIX: &str = "-formatado";

/// Options for [`discover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverOptions {
    /// Required file name prefix
    pub prefix: String,
}

impl DiscoverOptions {
    /// Use a different file name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            prefix: TRANSCRIPTION_PREFIX.to_string(),
        }
    }
}

/// Outcome of parsing one file in a batch.
#[derive(Debug)]
pub struct FileOutcome {
    /// Input path
    pub path: PathBuf,
    /// Parsed document or the error that stopped this file
    pub result: Result<Document>,
}

impl FileOutcome {
    /// Check if the file parsed successfully.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// File name for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Find transcription files in `dir`, sorted by file name.
///
/// # Returns
/// * `Err(Error::NoInputFiles)` when nothing matches
pub fn discover<P: AsRef<Path>>(dir: P, options: &DiscoverOptions) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_transcription_file(&path, &options.prefix) {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(Error::NoInputFiles(dir.to_path_buf()));
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!("Found {} transcription files in {}", paths.len(), dir.display());
    Ok(paths)
}

/// Parse every path, one outcome per path in input order.
///
/// A failing file is logged and reported in its outcome; it never stops the
/// rest of the batch.
pub fn parse_files(
    parser: &TranscriptParser,
    paths: &[PathBuf],
    parallel: bool,
) -> Vec<FileOutcome> {
    if parallel {
        paths.par_iter().map(|path| parse_one(parser, path)).collect()
    } else {
        paths.iter().map(|path| parse_one(parser, path)).collect()
    }
}

fn parse_one(parser: &TranscriptParser, path: &Path) -> FileOutcome {
    let result = parser.parse_file(path);
    if let Err(ref e) = result {
        log::warn!("Failed to format {}: {}", path.display(), e);
    }
    FileOutcome {
        path: path.to_path_buf(),
        result,
    }
}

/// Join documents, in the given order, into one book document.
///
/// Bodies are concatenated, statistics and harvested contents merged, the
/// page range widened to cover every input, and the index rebuilt over the
/// combined body.
pub fn consolidate(docs: &[Document], mut metadata: Metadata, index_cap: usize) -> Document {
    let mut stats = FormatStats::new();
    let mut contents = Vec::new();
    let mut body = Vec::new();
    let mut pages: Option<PageRange> = None;

    for doc in docs {
        stats.merge(&doc.stats);
        contents.extend(doc.contents.iter().cloned());
        body.extend(doc.body.iter().cloned());
        if let Some(range) = doc.metadata.pages {
            pages = Some(pages.map_or(range, |p| p.union(&range)));
        }
    }

    if metadata.pages.is_none() {
        metadata.pages = pages;
    }

    Document {
        metadata,
        contents,
        index: build_index(&body, index_cap),
        body,
        stats,
    }
}

/// Output file name for a transcription file.
///
/// `transcricao-paginas-1-20.md` becomes `paginas-1-20-formatado.md`; names
/// without a page range keep their stem.
pub fn output_file_name<P: AsRef<Path>>(input: P) -> String {
    let input = input.as_ref();
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match PageRange::from_file_name(&name) {
        Some(range) => format!("paginas-{}{}.md", range, OUTPUT_SUFFIX),
        None => {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{}{}.md", stem, OUTPUT_SUFFIX)
        }
    }
}

/// Output path for a transcription file inside `out_dir`.
pub fn output_path<P: AsRef<Path>, Q: AsRef<Path>>(input: P, out_dir: Q) -> PathBuf {
    out_dir.as_ref().join(output_file_name(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructuralElement;

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("livro/transcricao-paginas-1-20.md"),
            "paginas-1-20-formatado.md"
        );
        assert_eq!(output_file_name("notas.md"), "notas-formatado.md");
    }

    #[test]
    fn test_output_path() {
        let path = output_path("transcricao-paginas-21-40.md", Path::new("out").join(OUTPUT_DIR));
        assert_eq!(
            path,
            Path::new("out")
                .join("formatadas")
                .join("paginas-21-40-formatado.md")
        );
    }

    #[test]
    fn test_consolidate_order_and_range() {
        let mut first = Document::with_metadata(
            Metadata::default().with_source("transcricao-paginas-1-20.md"),
        );
        first.body.push(StructuralElement::heading(2, "PARTE UM"));
        first.stats.paragraph_count = 2;

        let mut second = Document::with_metadata(
            Metadata::default().with_source("transcricao-paginas-21-40.md"),
        );
        second.body.push(StructuralElement::heading(2, "PARTE DOIS"));
        second.contents.push("1 Capítulo".to_string());
        second.stats.paragraph_count = 3;

        let book = consolidate(
            &[first, second],
            Metadata::for_book(Some("Livro".into()), None),
            30,
        );

        assert_eq!(book.metadata.pages, Some(PageRange { start: 1, end: 40 }));
        assert_eq!(book.metadata.title.as_deref(), Some("Livro"));
        assert_eq!(book.stats.paragraph_count, 5);
        assert_eq!(book.contents, vec!["1 Capítulo"]);
        let titles: Vec<_> = book.index.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["PARTE UM", "PARTE DOIS"]);
    }

    #[test]
    fn test_consolidate_empty() {
        let book = consolidate(&[], Metadata::default(), 30);
        assert!(book.is_empty());
        assert!(book.metadata.pages.is_none());
    }
}
