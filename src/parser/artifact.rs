//! Artifact filtering: page markers, running headers and publisher boilerplate.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;

use super::options::ParseOptions;

/// Exact lines the transcription tool writes between pages.
const SEPARATORS: [&str; 3] = ["---", "***", "___"];

/// Case-insensitive fragments of copyright notices.
const COPYRIGHT_NEEDLES: [&str; 2] = ["copyright", "todos os direitos"];

/// Keywords that end the front matter.
const FRONT_MATTER_END: [&str; 3] = ["SUMÁRIO", "INTRODUÇÃO", "CAPÍTULO"];

/// Publisher spans removed before line processing.
const BUILTIN_SPANS: [&str; 3] = [
    r"dLivros\s+Livros.*?Converted by convertEPub",
    r"Copyright.*?GMT Editores.*?\.com\.br",
    r"\A\s*# Transcrição:.*?(?:\r?\n){2}",
];

static PAGE_MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#{1,6}\s*p[áa]gina\s+\d+\b").expect("valid page marker regex")
});

/// Per-file filter state. Create one per parse run.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Page boundaries seen so far
    pub page: u32,

    /// Lines dropped so far
    pub dropped: u32,

    skipping_front_matter: bool,
}

impl PageContext {
    /// Create a fresh context.
    pub fn new(skip_front_matter: bool) -> Self {
        Self {
            page: 0,
            dropped: 0,
            skipping_front_matter: skip_front_matter,
        }
    }

    /// Whether front matter is still being skipped.
    pub fn in_front_matter(&self) -> bool {
        self.skipping_front_matter
    }
}

/// Why a line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Horizontal-rule page separator
    Separator,
    /// `## Página N` header
    PageMarker,
    /// Bare page number
    PageNumber,
    /// Running title, author or copyright line
    Boilerplate,
    /// Cover or catalog page content
    FrontMatter,
}

/// Filter decision for one raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Line is content
    Keep,
    /// Line is an artifact
    Drop(DropReason),
}

impl Verdict {
    /// Check if the line should be dropped.
    pub fn is_drop(&self) -> bool {
        matches!(self, Verdict::Drop(_))
    }
}

/// Line filter for pagination and boilerplate artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactFilter {
    spans: Vec<Regex>,
    needles: Vec<String>,
    front_matter_pages: u32,
}

impl ArtifactFilter {
    /// Build a filter from parse options.
    ///
    /// Fails if a configured boilerplate pattern is not a valid regex.
    pub fn new(options: &ParseOptions) -> Result<Self> {
        let builtin: &[&str] = if options.builtin_boilerplate {
            &BUILTIN_SPANS
        } else {
            &[]
        };

        let spans = builtin
            .iter()
            .copied()
            .chain(options.boilerplate_patterns.iter().map(String::as_str))
            .map(|pattern| RegexBuilder::new(pattern).dot_matches_new_line(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let needles = [options.title.as_deref(), options.author.as_deref()]
            .into_iter()
            .flatten()
            .chain(COPYRIGHT_NEEDLES)
            .map(fold)
            .filter(|needle| !needle.is_empty())
            .collect();

        Ok(Self {
            spans,
            needles,
            front_matter_pages: options.front_matter_pages,
        })
    }

    /// Remove multi-line boilerplate spans from the whole text.
    pub fn strip_spans<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut result = Cow::Borrowed(text);
        for span in &self.spans {
            if span.is_match(&result) {
                log::debug!("Removing boilerplate span /{}/", span.as_str());
                result = Cow::Owned(span.replace_all(&result, "").into_owned());
            }
        }
        result
    }

    /// Decide whether a raw line is an artifact, updating the page counter.
    pub fn check(&self, line: &str, ctx: &mut PageContext) -> Verdict {
        let verdict = self.classify(line.trim(), ctx);
        if verdict.is_drop() {
            ctx.dropped += 1;
        }
        verdict
    }

    fn classify(&self, trimmed: &str, ctx: &mut PageContext) -> Verdict {
        if SEPARATORS.contains(&trimmed) {
            ctx.page += 1;
            return Verdict::Drop(DropReason::Separator);
        }

        if PAGE_MARKER_REGEX.is_match(trimmed) {
            ctx.page += 1;
            return Verdict::Drop(DropReason::PageMarker);
        }

        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Verdict::Drop(DropReason::PageNumber);
        }

        if trimmed.is_empty() {
            return Verdict::Keep;
        }

        let folded = fold(trimmed);
        if self.needles.iter().any(|needle| folded.contains(needle.as_str())) {
            return Verdict::Drop(DropReason::Boilerplate);
        }

        if ctx.skipping_front_matter {
            let upper = folded.to_uppercase();
            if FRONT_MATTER_END.iter().any(|keyword| upper.contains(keyword)) {
                ctx.skipping_front_matter = false;
            } else if ctx.page < self.front_matter_pages {
                return Verdict::Drop(DropReason::FrontMatter);
            }
        }

        Verdict::Keep
    }
}

/// Normalize a kept line: NFC, trimmed, internal whitespace collapsed.
pub fn normalize_line(line: &str) -> String {
    let composed: String = line.nfc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// NFC + lowercase for case-insensitive substring matching.
fn fold(text: &str) -> String {
    text.trim().nfc().collect::<String>().to_lowercase()
}
