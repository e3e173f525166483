//! Markdown rendering for formatted transcriptions.

use crate::error::Result;
use crate::model::{Document, IndexEntry, Metadata, StructuralElement};

use super::normalize::normalize;
use super::{RenderOptions, RenderResult};

/// Title used when no book title is configured.
const FALLBACK_TITLE: &str = "Transcrição";

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
            output.push('\n');
        }
        if self.options.include_header {
            render_header(&mut output, &doc.metadata);
        }
        if self.options.include_contents {
            render_contents(&mut output, &doc.contents, self.options.contents_cap);
        }
        if self.options.include_index {
            render_index(&mut output, &doc.index);
        }
        render_body(&mut output, &doc.body);

        if self.options.normalize {
            output = normalize(&output);
        }

        let trimmed = output.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{}\n", trimmed))
    }

    /// Render a document to Markdown with its formatting statistics.
    pub fn render_with_stats(&self, doc: &Document) -> Result<RenderResult> {
        let content = self.render(doc)?;
        Ok(RenderResult::new(
            content,
            doc.metadata.clone(),
            doc.stats.clone(),
        ))
    }
}

/// Write the book header: title line, subtitle, page range and a rule.
fn render_header(output: &mut String, metadata: &Metadata) {
    let title = metadata.title.as_deref().filter(|t| !t.trim().is_empty());
    let author = metadata.author.as_deref().filter(|a| !a.trim().is_empty());

    match (title, author) {
        (Some(title), Some(author)) => output.push_str(&format!("# {} - {}\n", title, author)),
        (Some(title), None) => output.push_str(&format!("# {}\n", title)),
        (None, _) => output.push_str(&format!("# {}\n", FALLBACK_TITLE)),
    }
    output.push_str("*Transcrição Formatada*\n\n");

    if let Some(pages) = metadata.pages {
        output.push_str(&format!(
            "**Páginas**: {} a {} (Total: {} páginas)\n\n",
            pages.start,
            pages.end,
            pages.total()
        ));
    }

    output.push_str("---\n\n");
}

/// Write the harvested `## Sumário` entries, at most `cap` of them.
fn render_contents(output: &mut String, contents: &[String], cap: usize) {
    if contents.is_empty() || cap == 0 {
        return;
    }

    output.push_str("## Sumário\n\n");
    for entry in contents.iter().take(cap) {
        output.push_str(&format!("- {}\n", entry));
    }
    output.push_str("\n---\n\n");
}

/// Write the `## Índice` block. Nothing is written for an empty index.
fn render_index(output: &mut String, index: &[IndexEntry]) {
    if index.is_empty() {
        return;
    }

    output.push_str("## Índice\n\n");
    for entry in index {
        match entry.level {
            2 => output.push_str(&format!("- **{}**\n", entry.title)),
            _ => {
                output.push_str(&"  ".repeat(entry.depth()));
                output.push_str(&format!("- {}\n", entry.title));
            }
        }
    }
    output.push_str("\n---\n\n");
}

fn render_body(output: &mut String, body: &[StructuralElement]) {
    let mut previous: Option<&StructuralElement> = None;

    for element in body {
        match element {
            StructuralElement::Heading { level, text } => {
                ensure_blank_line(output);
                output.push_str(&"#".repeat(*level as usize));
                output.push(' ');
                output.push_str(text);
                output.push_str("\n\n");
            }
            StructuralElement::Quote { text } => {
                ensure_blank_line(output);
                output.push_str("> ");
                output.push_str(text);
                output.push_str("\n\n");
            }
            StructuralElement::ListItem { text } => {
                let continues_list = match previous {
                    Some(StructuralElement::ListItem { text: prev }) => {
                        is_bullet(prev) == is_bullet(text)
                    }
                    _ => false,
                };
                if !continues_list {
                    ensure_blank_line(output);
                }
                output.push_str(text);
                output.push('\n');
            }
            StructuralElement::Footnote { text } => {
                ensure_blank_line(output);
                output.push_str("_Nota:_ ");
                output.push_str(text);
                output.push_str("\n\n");
            }
            StructuralElement::Paragraph { text } => {
                ensure_blank_line(output);
                output.push_str(text);
                output.push_str("\n\n");
            }
            StructuralElement::Break => output.push('\n'),
        }
        previous = Some(element);
    }
}

fn is_bullet(item: &str) -> bool {
    item.starts_with("- ")
}

/// Terminate the current line and make sure one empty line follows it.
fn ensure_blank_line(output: &mut String) {
    if output.is_empty() || output.ends_with("\n\n") {
        return;
    }
    if output.ends_with('\n') {
        output.push('\n');
    } else {
        output.push_str("\n\n");
    }
}
