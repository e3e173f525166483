//! Rendering options and configuration.

use serde::{Deserialize, Serialize};

/// Contents entries written by default.
pub const DEFAULT_CONTENTS_CAP: usize = 30;

/// Options for rendering a formatted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Write the book header (title, page range, rule)
    pub include_header: bool,

    /// Write the `## Sumário` block when contents were harvested
    pub include_contents: bool,

    /// Most contents entries written
    pub contents_cap: usize,

    /// Write the `## Índice` block when headings exist
    pub include_index: bool,

    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Apply blank-line collapsing and heading spacing to the output
    pub normalize: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the header.
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Enable or disable the harvested contents block.
    pub fn with_contents(mut self, include: bool) -> Self {
        self.include_contents = include;
        self
    }

    /// Limit the number of contents entries written.
    pub fn with_contents_cap(mut self, cap: usize) -> Self {
        self.contents_cap = cap;
        self
    }

    /// Enable or disable the index block.
    pub fn with_index(mut self, include: bool) -> Self {
        self.include_index = include;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable output normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Body only: no header, contents, index or frontmatter.
    pub fn body_only() -> Self {
        Self {
            include_header: false,
            include_contents: false,
            contents_cap: DEFAULT_CONTENTS_CAP,
            include_index: false,
            include_frontmatter: false,
            normalize: true,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            include_contents: true,
            contents_cap: DEFAULT_CONTENTS_CAP,
            include_index: true,
            include_frontmatter: false,
            normalize: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_index(false)
            .with_frontmatter(true);

        assert!(options.include_header);
        assert!(options.include_contents);
        assert_eq!(options.contents_cap, DEFAULT_CONTENTS_CAP);
        assert!(!options.include_index);
        assert!(options.include_frontmatter);
        assert!(options.normalize);
    }

    #[test]
    fn test_body_only() {
        let options = RenderOptions::body_only();
        assert!(!options.include_header);
        assert!(!options.include_contents);
        assert!(!options.include_index);
    }
}
