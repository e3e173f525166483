//! Structural emission.
//!
//! Turns the classified line stream into body elements, routing paragraph
//! fragments through the reflow buffer.

use crate::model::{ClassifiedLine, StructuralElement, Tag};

use super::reflow::ParagraphBuffer;

/// Heading level for a heading tag when the line carries none.
fn default_level(tag: Tag) -> u8 {
    match tag {
        Tag::Part | Tag::Chapter | Tag::NamedSection => 2,
        Tag::Section => 3,
        _ => 4,
    }
}

/// Elements produced by one parse run.
#[derive(Debug, Clone, Default)]
pub struct Emission {
    /// Body elements in order
    pub elements: Vec<StructuralElement>,
    /// Paragraphs dropped for being too short
    pub discarded: u32,
    /// Noise lines dropped
    pub noise: u32,
}

/// Stateful converter from classified lines to structural elements.
///
/// The paragraph buffer is always flushed before any other element is
/// appended, before a blank or noise line is handled, and in [`finish`].
///
/// [`finish`]: Emitter::finish
#[derive(Debug)]
pub struct Emitter {
    min_paragraph_len: usize,
    buffer: ParagraphBuffer,
    elements: Vec<StructuralElement>,
    noise: u32,
}

impl Emitter {
    /// Create an emitter that keeps paragraphs longer than `min_paragraph_len`.
    pub fn new(min_paragraph_len: usize) -> Self {
        Self {
            min_paragraph_len,
            buffer: ParagraphBuffer::new(),
            elements: Vec::new(),
            noise: 0,
        }
    }

    /// Feed one classified line.
    pub fn push(&mut self, line: ClassifiedLine) {
        match line.tag {
            Tag::Paragraph => self.buffer.push(&line.text),
            Tag::Blank => {
                if self.buffer.is_empty() {
                    if matches!(
                        self.elements.last(),
                        Some(StructuralElement::Paragraph { .. } | StructuralElement::Break)
                    ) {
                        self.elements.push(StructuralElement::Break);
                    }
                } else {
                    self.flush();
                }
            }
            Tag::Noise => {
                self.flush();
                self.noise += 1;
            }
            Tag::Contents => self.flush(),
            Tag::Quote => {
                self.flush();
                self.elements.push(StructuralElement::Quote { text: line.text });
            }
            Tag::NumberedListItem | Tag::BulletListItem => {
                self.flush();
                self.elements
                    .push(StructuralElement::ListItem { text: line.text });
            }
            Tag::Footnote => {
                self.flush();
                self.elements
                    .push(StructuralElement::Footnote { text: line.text });
            }
            Tag::Part | Tag::Chapter | Tag::NamedSection | Tag::Section | Tag::Subsection => {
                self.flush();
                let level = line.level.unwrap_or_else(|| default_level(line.tag));
                self.elements
                    .push(StructuralElement::heading(level, line.text));
            }
        }
    }

    /// Flush the remaining buffer and return everything emitted.
    pub fn finish(mut self) -> Emission {
        self.flush();
        Emission {
            elements: self.elements,
            discarded: self.buffer.discarded(),
            noise: self.noise,
        }
    }

    fn flush(&mut self) {
        if let Some(text) = self.buffer.flush(self.min_paragraph_len) {
            self.elements.push(StructuralElement::paragraph(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: &str = "Um parágrafo suficientemente longo para ser mantido.";

    fn emit(lines: Vec<ClassifiedLine>) -> Emission {
        let mut emitter = Emitter::new(20);
        for line in lines {
            emitter.push(line);
        }
        emitter.finish()
    }

    fn para(text: &str) -> ClassifiedLine {
        ClassifiedLine::new(Tag::Paragraph, text)
    }

    #[test]
    fn test_heading_flushes_buffer_first() {
        let emission = emit(vec![
            para(LONG),
            ClassifiedLine::heading(Tag::Chapter, "Capítulo 1", 2),
        ]);
        assert_eq!(
            emission.elements,
            vec![
                StructuralElement::paragraph(LONG),
                StructuralElement::heading(2, "Capítulo 1"),
            ]
        );
    }

    #[test]
    fn test_heading_levels_from_tags() {
        let emission = emit(vec![
            ClassifiedLine::new(Tag::Part, "PARTE UM"),
            ClassifiedLine::new(Tag::Section, "Seção"),
            ClassifiedLine::new(Tag::Subsection, "Detalhe:"),
            ClassifiedLine::new(Tag::NamedSection, "Notas"),
        ]);
        let levels: Vec<_> = emission
            .elements
            .iter()
            .filter_map(StructuralElement::heading_level)
            .collect();
        assert_eq!(levels, vec![2, 3, 4, 2]);
    }

    #[test]
    fn test_fragments_reflow_until_blank() {
        let emission = emit(vec![
            para("Primeira metade de uma frase"),
            para("e a segunda metade dela."),
            ClassifiedLine::blank(),
        ]);
        assert_eq!(
            emission.elements,
            vec![StructuralElement::paragraph(
                "Primeira metade de uma frase e a segunda metade dela."
            )]
        );
    }

    #[test]
    fn test_blank_runs_become_breaks() {
        let mut lines = vec![para(LONG)];
        lines.extend(std::iter::repeat_with(ClassifiedLine::blank).take(5));
        lines.push(para(LONG));
        let emission = emit(lines);

        let breaks = emission
            .elements
            .iter()
            .filter(|e| **e == StructuralElement::Break)
            .count();
        assert_eq!(breaks, 4);
        assert_eq!(emission.elements.len(), 6);
    }

    #[test]
    fn test_blank_after_heading_is_not_a_break() {
        let emission = emit(vec![
            ClassifiedLine::heading(Tag::Part, "PARTE UM", 2),
            ClassifiedLine::blank(),
            ClassifiedLine::blank(),
        ]);
        assert_eq!(emission.elements, vec![StructuralElement::heading(2, "PARTE UM")]);
    }

    #[test]
    fn test_noise_and_contents_emit_nothing() {
        let emission = emit(vec![
            ClassifiedLine::new(Tag::Contents, "SUMÁRIO"),
            ClassifiedLine::new(Tag::Noise, "•"),
        ]);
        assert!(emission.elements.is_empty());
        assert_eq!(emission.noise, 1);
    }

    #[test]
    fn test_noise_splits_paragraphs() {
        let emission = emit(vec![
            para(LONG),
            ClassifiedLine::new(Tag::Noise, "~"),
            para(LONG),
        ]);
        assert_eq!(emission.elements.len(), 2);
    }

    #[test]
    fn test_short_paragraph_discarded_at_end() {
        let emission = emit(vec![para("Ok.")]);
        assert!(emission.elements.is_empty());
        assert_eq!(emission.discarded, 1);
    }

    #[test]
    fn test_list_and_quote_elements() {
        let emission = emit(vec![
            ClassifiedLine::new(Tag::BulletListItem, "- Projetos"),
            ClassifiedLine::new(Tag::NumberedListItem, "2. Áreas"),
            ClassifiedLine::new(Tag::Quote, "\"Frase.\" – Autor"),
        ]);
        assert_eq!(
            emission.elements,
            vec![
                StructuralElement::ListItem {
                    text: "- Projetos".into()
                },
                StructuralElement::ListItem {
                    text: "2. Áreas".into()
                },
                StructuralElement::Quote {
                    text: "\"Frase.\" – Autor".into()
                },
            ]
        );
    }

    #[test]
    fn test_footnote_closes_paragraph() {
        let emission = emit(vec![
            para(LONG),
            ClassifiedLine::new(Tag::Footnote, "Dados de 2017."),
            para(LONG),
        ]);
        assert_eq!(
            emission.elements,
            vec![
                StructuralElement::paragraph(LONG),
                StructuralElement::Footnote {
                    text: "Dados de 2017.".into()
                },
                StructuralElement::paragraph(LONG),
            ]
        );
    }
}
