//! Document-level types.

use super::{IndexEntry, StructuralElement};
use crate::detect::PageRange;
use crate::render::FormatStats;
use serde::{Deserialize, Serialize};

/// A formatted transcription.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, page range)
    pub metadata: Metadata,

    /// Lines harvested from the book's own table of contents
    pub contents: Vec<String>,

    /// Index entries derived from emitted headings
    pub index: Vec<IndexEntry>,

    /// Body elements in emission order
    pub body: Vec<StructuralElement>,

    /// Processing statistics
    pub stats: FormatStats,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with the given metadata.
    pub fn with_metadata(metadata: Metadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }

    /// Check if the body has no elements.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterate over heading elements as `(level, text)`.
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.body.iter().filter_map(|element| match element {
            StructuralElement::Heading { level, text } => Some((*level, text.as_str())),
            _ => None,
        })
    }

    /// Get plain text content of the body, one element per paragraph.
    pub fn plain_text(&self) -> String {
        self.body
            .iter()
            .filter_map(|element| element.text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Book title (configured, never inferred)
    pub title: Option<String>,

    /// Book author (configured, never inferred)
    pub author: Option<String>,

    /// Source file name
    pub source: Option<String>,

    /// Page range encoded in the source file name
    pub pages: Option<PageRange>,
}

impl Metadata {
    /// Create metadata for a book.
    pub fn for_book(title: Option<String>, author: Option<String>) -> Self {
        Self {
            title,
            author,
            ..Default::default()
        }
    }

    /// Set the source file name and derive the page range from it.
    pub fn with_source(mut self, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        self.pages = PageRange::from_file_name(&file_name);
        self.source = Some(file_name);
        self
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref author) = self.author {
            lines.push(format!("author: \"{}\"", escape_yaml(author)));
        }
        if let Some(ref source) = self.source {
            lines.push(format!("source: \"{}\"", escape_yaml(source)));
        }
        if let Some(pages) = self.pages {
            lines.push(format!("first_page: {}", pages.start));
            lines.push(format!("last_page: {}", pages.end));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
