//! # unocr
//!
//! Turns raw OCR transcriptions of scanned books into structured Markdown.
//!
//! The transcription tool writes page-by-page dumps full of page markers,
//! running headers and lines broken at the physical page width. This library
//! removes the artifacts, classifies every line (part, chapter, section,
//! quote, list item, paragraph fragment), reflows paragraphs and renders a
//! document with a header and an index.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unocr::{parse_file, render};
//!
//! fn main() -> unocr::Result<()> {
//!     let doc = parse_file("transcricao-paginas-1-20.md")?;
//!
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Artifact removal**: page markers, bare page numbers, running headers,
//!   publisher boilerplate, optional front matter
//! - **Structure detection**: parts, chapters, front and back matter
//!   sections, quotes, footnotes and lists
//! - **Table of contents**: the book's own `SUMÁRIO` harvested into a
//!   `## Sumário` block
//! - **Paragraph reflow**: OCR line fragments joined into paragraphs
//! - **Batch processing**: whole directories in parallel with Rayon, plus
//!   consolidation into a single book
//! - **Output formats**: Markdown and JSON

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{consolidate, discover, parse_files, DiscoverOptions, FileOutcome};
pub use detect::{is_transcription_file, PageRange};
pub use error::{Error, Result};
pub use model::{
    ClassifiedLine, Document, IndexEntry, Metadata, StructuralElement, Tag,
};
pub use parser::{HeadingWindow, ParseOptions, TranscriptParser};
pub use render::{FormatStats, JsonFormat, RenderOptions};

use std::path::Path;

/// Parse a transcription file with default options.
///
/// # Example
///
/// ```no_run
/// use unocr::parse_file;
///
/// let doc = parse_file("transcricao-paginas-1-20.md").unwrap();
/// println!("Headings: {}", doc.stats.heading_count);
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a transcription file with custom options.
///
/// # Example
///
/// ```no_run
/// use unocr::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new()
///     .with_title("Criando um Segundo Cérebro")
///     .with_author("Tiago Forte");
/// let doc = parse_file_with_options("transcricao-paginas-1-20.md", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = TranscriptParser::new(options)?;
    parser.parse_file(path)
}

/// Parse transcription text with default options.
pub fn parse_str(text: &str) -> Result<Document> {
    let parser = TranscriptParser::new(ParseOptions::default())?;
    Ok(parser.parse_str(text, None))
}

/// Format transcription text straight to Markdown.
///
/// # Example
///
/// ```
/// use unocr::{format_str, ParseOptions};
///
/// let text = "PARTE UM\n\nEste é um parágrafo longo o bastante para ser mantido.";
/// let markdown = format_str(text, ParseOptions::default()).unwrap();
/// assert!(markdown.contains("## PARTE UM"));
/// ```
pub fn format_str(text: &str, options: ParseOptions) -> Result<String> {
    let parser = TranscriptParser::new(options)?;
    let doc = parser.parse_str(text, None);
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a transcription file to Markdown.
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a transcription file to JSON.
///
/// # Example
///
/// ```no_run
/// use unocr::{to_json, JsonFormat};
///
/// let json = to_json("transcricao-paginas-1-20.md", JsonFormat::Pretty).unwrap();
/// std::fs::write("paginas-1-20.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and rendering transcriptions.
///
/// # Example
///
/// ```no_run
/// use unocr::Unocr;
///
/// let markdown = Unocr::new()
///     .with_title("Criando um Segundo Cérebro")
///     .with_author("Tiago Forte")
///     .skip_front_matter()
///     .parse("transcricao-paginas-1-20.md")?
///     .to_markdown()?;
/// # Ok::<(), unocr::Error>(())
/// ```
pub struct Unocr {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Unocr {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Use the given parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set the book title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_title(title);
        self
    }

    /// Set the book author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_author(author);
        self
    }

    /// Set the minimum paragraph length.
    pub fn with_min_paragraph_len(mut self, len: usize) -> Self {
        self.parse_options = self.parse_options.with_min_paragraph_len(len);
        self
    }

    /// Skip cover and catalog pages.
    pub fn skip_front_matter(mut self) -> Self {
        self.parse_options = self.parse_options.with_front_matter_skip(true);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Leave the index block out of the output.
    pub fn without_index(mut self) -> Self {
        self.render_options = self.render_options.with_index(false);
        self
    }

    /// Parse a transcription file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnocrResult> {
        let parser = TranscriptParser::new(self.parse_options)?;
        let document = parser.parse_file(path)?;
        Ok(UnocrResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse transcription text.
    pub fn parse_str(self, text: &str) -> Result<UnocrResult> {
        let parser = TranscriptParser::new(self.parse_options)?;
        let document = parser.parse_str(text, None);
        Ok(UnocrResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Unocr {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a transcription.
pub struct UnocrResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnocrResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the body as plain text.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
