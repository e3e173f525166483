//! Structural elements produced by the emitter.

use serde::{Deserialize, Serialize};

/// A unit of the document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralElement {
    /// Heading with level 2-4
    Heading {
        /// Heading level
        level: u8,
        /// Heading text
        text: String,
    },

    /// Blockquote
    Quote {
        /// Quoted text including attribution
        text: String,
    },

    /// Normalized list line (`- item` or `1. item`)
    ListItem {
        /// List line text including its marker
        text: String,
    },

    /// Footnote line, rendered as `_Nota:_ text`
    Footnote {
        /// Note text without its marker
        text: String,
    },

    /// Reflowed paragraph
    Paragraph {
        /// Joined paragraph text
        text: String,
    },

    /// Extra blank line kept from a run of blank input lines
    Break,
}

impl StructuralElement {
    /// Create a heading element.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        StructuralElement::Heading {
            level,
            text: text.into(),
        }
    }

    /// Create a paragraph element.
    pub fn paragraph(text: impl Into<String>) -> Self {
        StructuralElement::Paragraph { text: text.into() }
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            StructuralElement::Heading { text, .. }
            | StructuralElement::Quote { text }
            | StructuralElement::ListItem { text }
            | StructuralElement::Footnote { text }
            | StructuralElement::Paragraph { text } => Some(text),
            StructuralElement::Break => None,
        }
    }

    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            StructuralElement::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Check if this element is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, StructuralElement::Heading { .. })
    }
}

/// A table-of-contents entry derived from an emitted heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Heading level (2 = top-level entry)
    pub level: u8,

    /// Heading title
    pub title: String,
}

impl IndexEntry {
    /// Create a new index entry.
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
        }
    }

    /// Nesting depth relative to a level-2 entry.
    pub fn depth(&self) -> usize {
        self.level.saturating_sub(2) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_accessors() {
        let heading = StructuralElement::heading(3, "Introdução");
        assert!(heading.is_heading());
        assert_eq!(heading.heading_level(), Some(3));
        assert_eq!(heading.text(), Some("Introdução"));

        assert_eq!(StructuralElement::Break.text(), None);
        assert!(!StructuralElement::paragraph("texto").is_heading());
    }

    #[test]
    fn test_index_entry_depth() {
        assert_eq!(IndexEntry::new(2, "PARTE UM").depth(), 0);
        assert_eq!(IndexEntry::new(3, "Seção").depth(), 1);
        assert_eq!(IndexEntry::new(4, "Detalhe").depth(), 2);
    }

    #[test]
    fn test_element_serializes_with_kind() {
        let json = serde_json::to_string(&StructuralElement::paragraph("Olá")).unwrap();
        assert_eq!(json, r#"{"kind":"paragraph","text":"Olá"}"#);
    }
}
