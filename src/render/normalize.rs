//! Whitespace normalization of rendered Markdown.
//!
//! Both passes are idempotent: running [`normalize`] on its own output
//! changes nothing.

use std::sync::LazyLock;

use regex::Regex;

static BLANK_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{4,}").expect("valid blank run regex"));

static CRAMPED_HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\n])\n(#{1,4}[ \t])").expect("valid heading spacing regex"));

/// Collapse runs of three or more blank lines to exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_REGEX.replace_all(text, "\n\n\n").into_owned()
}

/// Put a blank line before every heading line that lacks one.
pub fn space_headings(text: &str) -> String {
    CRAMPED_HEADING_REGEX
        .replace_all(text, "${1}\n\n${2}")
        .into_owned()
}

/// Apply both passes in order.
pub fn normalize(text: &str) -> String {
    space_headings(&collapse_blank_lines(text))
}
