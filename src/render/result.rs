//! Rendering result with metadata and statistics.

use crate::model::{Metadata, StructuralElement, Tag};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered Markdown
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Formatting statistics
    pub stats: FormatStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: FormatStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while formatting a transcription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatStats {
    /// Page boundaries seen in the input
    pub page_count: u32,

    /// Part headings
    pub part_count: u32,

    /// Chapter headings
    pub chapter_count: u32,

    /// Section headings
    pub section_count: u32,

    /// Subsection headings
    pub subsection_count: u32,

    /// Headings of any level
    pub heading_count: u32,

    /// Reflowed paragraphs kept
    pub paragraph_count: u32,

    /// Blockquotes
    pub quote_count: u32,

    /// List items
    pub list_item_count: u32,

    /// Footnotes
    pub footnote_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,

    /// Raw lines removed by the artifact filter
    pub dropped_line_count: u32,

    /// Paragraphs discarded for being too short
    pub discarded_paragraph_count: u32,

    /// Single-character OCR specks removed
    pub noise_count: u32,
}

impl FormatStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a heading by the tag that produced it.
    pub fn record_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Part => self.part_count += 1,
            Tag::Chapter => self.chapter_count += 1,
            Tag::Section => self.section_count += 1,
            Tag::Subsection => self.subsection_count += 1,
            _ => {}
        }
    }

    /// Count an emitted body element and its text.
    pub fn record_element(&mut self, element: &StructuralElement) {
        match element {
            StructuralElement::Heading { .. } => self.heading_count += 1,
            StructuralElement::Quote { .. } => self.quote_count += 1,
            StructuralElement::ListItem { .. } => self.list_item_count += 1,
            StructuralElement::Footnote { .. } => self.footnote_count += 1,
            StructuralElement::Paragraph { .. } => self.paragraph_count += 1,
            StructuralElement::Break => {}
        }
        if let Some(text) = element.text() {
            self.count_text(text);
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &FormatStats) {
        self.page_count += other.page_count;
        self.part_count += other.part_count;
        self.chapter_count += other.chapter_count;
        self.section_count += other.section_count;
        self.subsection_count += other.subsection_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.quote_count += other.quote_count;
        self.list_item_count += other.list_item_count;
        self.footnote_count += other.footnote_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
        self.dropped_line_count += other.dropped_line_count;
        self.discarded_paragraph_count += other.discarded_paragraph_count;
        self.noise_count += other.noise_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stats_count_text() {
        let mut stats = FormatStats::new();
        stats.count_text("Olá, mundo! Isto é um teste.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 23);
    }

    #[test]
    fn test_record_element() {
        let mut stats = FormatStats::new();
        stats.record_element(&StructuralElement::heading(2, "PARTE UM"));
        stats.record_element(&StructuralElement::paragraph("duas palavras"));
        stats.record_element(&StructuralElement::Break);

        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.word_count, 4);
    }

    #[test]
    fn test_record_tag_ignores_non_headings() {
        let mut stats = FormatStats::new();
        stats.record_tag(Tag::Part);
        stats.record_tag(Tag::Chapter);
        stats.record_tag(Tag::Paragraph);
        assert_eq!(stats.part_count, 1);
        assert_eq!(stats.chapter_count, 1);
        assert_eq!(stats.section_count, 0);
    }

    #[test]
    fn test_format_stats_merge() {
        let mut stats1 = FormatStats {
            paragraph_count: 5,
            page_count: 20,
            ..Default::default()
        };
        let stats2 = FormatStats {
            paragraph_count: 3,
            page_count: 20,
            quote_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.page_count, 40);
        assert_eq!(stats1.quote_count, 4);
    }
}
