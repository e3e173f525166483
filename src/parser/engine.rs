//! Transcription parser driving the filter, classifier and emitter.

use std::path::Path;

use crate::detect::read_text;
use crate::error::Result;
use crate::model::{ClassifiedLine, Document, Metadata, Tag};
use crate::render::FormatStats;

use super::artifact::{normalize_line, ArtifactFilter, PageContext};
use super::classifier::{contents_block_len, harvest_contents, LineClassifier};
use super::emitter::Emitter;
use super::index::build_index;
use super::options::ParseOptions;

/// Transcription parser.
///
/// Holds only compiled configuration; all per-file state lives in the parse
/// call, so one parser can be shared across threads.
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    options: ParseOptions,
    filter: ArtifactFilter,
    classifier: LineClassifier,
}

/// Kept lines of one input plus the filter state after reading it.
struct FilteredInput {
    lines: Vec<String>,
    ctx: PageContext,
}

impl TranscriptParser {
    /// Create a parser, validating the options and compiling patterns.
    pub fn new(options: ParseOptions) -> Result<Self> {
        options.validate()?;
        let filter = ArtifactFilter::new(&options)?;
        let classifier = LineClassifier::new(options.heading);
        Ok(Self {
            options,
            filter,
            classifier,
        })
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Read and parse a transcription file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        log::debug!("Parsing {}", path.display());

        let text = read_text(path)?;
        let source = path.file_name().and_then(|n| n.to_str());
        Ok(self.parse_str(&text, source))
    }

    /// Parse transcription text.
    ///
    /// `source` is the originating file name; when it follows the
    /// `transcricao-paginas-<a>-<b>` convention the page range is recorded.
    pub fn parse_str(&self, text: &str, source: Option<&str>) -> Document {
        let input = self.filter_lines(text);

        let mut metadata =
            Metadata::for_book(self.options.title.clone(), self.options.author.clone());
        if let Some(source) = source {
            metadata = metadata.with_source(source);
        }

        let mut document = Document::with_metadata(metadata);
        let mut stats = FormatStats::new();
        let mut emitter = Emitter::new(self.options.min_paragraph_len);

        // Lines before this index belong to a contents block already harvested
        let mut resume_at = 0;
        for (i, line) in input.lines.iter().enumerate() {
            if i < resume_at {
                continue;
            }
            let next = input.lines.get(i + 1).map(String::as_str);
            let classified = self.classifier.classify(line, next);

            if classified.tag == Tag::Contents {
                let following = &input.lines[i + 1..];
                let lookahead = self.options.contents_lookahead;
                let harvested = harvest_contents(following, lookahead);
                resume_at = i + 1 + contents_block_len(following, lookahead);
                log::debug!("Harvested {} contents lines", harvested.len());
                document.contents.extend(harvested);
            }

            stats.record_tag(classified.tag);
            emitter.push(classified);
        }

        let emission = emitter.finish();
        for element in &emission.elements {
            stats.record_element(element);
        }
        stats.page_count = input.ctx.page;
        stats.dropped_line_count = input.ctx.dropped;
        stats.discarded_paragraph_count = emission.discarded;
        stats.noise_count = emission.noise;

        document.index = build_index(&emission.elements, self.options.index_cap);
        document.body = emission.elements;
        document.stats = stats;

        log::debug!(
            "Emitted {} elements ({} headings, {} paragraphs), dropped {} lines",
            document.body.len(),
            document.stats.heading_count,
            document.stats.paragraph_count,
            document.stats.dropped_line_count
        );

        document
    }

    /// Classify every kept line without emitting, for diagnostics.
    pub fn classify_lines(&self, text: &str) -> Vec<ClassifiedLine> {
        let input = self.filter_lines(text);
        input
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let next = input.lines.get(i + 1).map(String::as_str);
                self.classifier.classify(line, next)
            })
            .collect()
    }

    fn filter_lines(&self, text: &str) -> FilteredInput {
        let text = self.filter.strip_spans(text);
        let mut ctx = PageContext::new(self.options.skip_front_matter);

        let lines = text
            .lines()
            .filter(|raw| !self.filter.check(raw, &mut ctx).is_drop())
            .map(normalize_line)
            .collect();

        FilteredInput { lines, ctx }
    }
}
