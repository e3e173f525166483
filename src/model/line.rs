//! Classified line types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic tag assigned to a single transcription line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    /// Table-of-contents marker (`SUMÁRIO`)
    Contents,
    /// Part heading (`PARTE UM`)
    Part,
    /// Chapter heading (`Capítulo 3`)
    Chapter,
    /// Front or back matter heading (`INTRODUÇÃO`, `Notas`, `Bibliografia`)
    NamedSection,
    /// Section heading (all-caps line or confirmed title)
    Section,
    /// Minor heading ending with a colon
    Subsection,
    /// Quotation with attribution
    Quote,
    /// `1.` or `1)` list item
    NumberedListItem,
    /// Bullet list item
    BulletListItem,
    /// Footnote introduced by `* `
    Footnote,
    /// Empty line
    Blank,
    /// Stray OCR speck
    Noise,
    /// Paragraph fragment
    Paragraph,
}

impl Tag {
    /// Whether lines with this tag become headings.
    pub fn is_heading(self) -> bool {
        matches!(
            self,
            Tag::Part | Tag::Chapter | Tag::NamedSection | Tag::Section | Tag::Subsection
        )
    }

    /// Short lowercase name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Contents => "contents",
            Tag::Part => "part",
            Tag::Chapter => "chapter",
            Tag::NamedSection => "named section",
            Tag::Section => "section",
            Tag::Subsection => "subsection",
            Tag::Quote => "quote",
            Tag::NumberedListItem => "numbered",
            Tag::BulletListItem => "bullet",
            Tag::Footnote => "footnote",
            Tag::Blank => "blank",
            Tag::Noise => "noise",
            Tag::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A line after classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLine {
    /// Semantic tag
    pub tag: Tag,

    /// Normalized text (re-cased for all-caps sections, bullet rewritten for lists)
    pub text: String,

    /// Heading level (2-4) for heading tags
    pub level: Option<u8>,
}

impl ClassifiedLine {
    /// Create a non-heading line.
    pub fn new(tag: Tag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
            level: None,
        }
    }

    /// Create a heading line with the given level.
    pub fn heading(tag: Tag, text: impl Into<String>, level: u8) -> Self {
        Self {
            tag,
            text: text.into(),
            level: Some(level),
        }
    }

    /// Create a blank line.
    pub fn blank() -> Self {
        Self::new(Tag::Blank, "")
    }
}
