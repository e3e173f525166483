//! Parsing options and configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Upper bound accepted for `min_paragraph_len`.
const MAX_PARAGRAPH_THRESHOLD: usize = 10_000;

/// Upper bound accepted for `index_cap`.
const MAX_INDEX_CAP: usize = 1_000;

/// Options for parsing transcriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Book title, used for the header and stripped as a running header
    pub title: Option<String>,

    /// Book author, used for the header and stripped as a running footer
    pub author: Option<String>,

    /// Reflowed paragraphs must be longer than this many characters
    pub min_paragraph_len: usize,

    /// Heading detection length window
    pub heading: HeadingWindow,

    /// Extra multi-line boilerplate patterns (regex, dot matches newline)
    pub boilerplate_patterns: Vec<String>,

    /// Whether to strip the built-in publisher boilerplate spans
    pub builtin_boilerplate: bool,

    /// Skip cover and catalog pages until the first content keyword
    pub skip_front_matter: bool,

    /// Front matter skipping stops after this many page markers
    pub front_matter_pages: u32,

    /// Number of lines scanned after a `SUMÁRIO` marker
    pub contents_lookahead: usize,

    /// Maximum number of index entries
    pub index_cap: usize,

    /// Whether batch runs may process files in parallel
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let options: ParseOptions = toml::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    /// Set the book title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the book author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the minimum paragraph length.
    pub fn with_min_paragraph_len(mut self, len: usize) -> Self {
        self.min_paragraph_len = len;
        self
    }

    /// Set the heading detection window.
    pub fn with_heading_window(mut self, window: HeadingWindow) -> Self {
        self.heading = window;
        self
    }

    /// Add a multi-line boilerplate pattern.
    pub fn with_boilerplate_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.boilerplate_patterns.push(pattern.into());
        self
    }

    /// Enable or disable the built-in boilerplate spans.
    pub fn with_builtin_boilerplate(mut self, enabled: bool) -> Self {
        self.builtin_boilerplate = enabled;
        self
    }

    /// Enable or disable front matter skipping.
    pub fn with_front_matter_skip(mut self, skip: bool) -> Self {
        self.skip_front_matter = skip;
        self
    }

    /// Set the number of lines harvested after a contents marker.
    pub fn with_contents_lookahead(mut self, lines: usize) -> Self {
        self.contents_lookahead = lines;
        self
    }

    /// Set the maximum number of index entries.
    pub fn with_index_cap(mut self, cap: usize) -> Self {
        self.index_cap = cap;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check that every value is within sane bounds.
    pub fn validate(&self) -> Result<()> {
        self.heading.validate()?;

        if self.min_paragraph_len > MAX_PARAGRAPH_THRESHOLD {
            return Err(Error::InvalidOption(format!(
                "min_paragraph_len {} exceeds {}",
                self.min_paragraph_len, MAX_PARAGRAPH_THRESHOLD
            )));
        }
        if self.index_cap > MAX_INDEX_CAP {
            return Err(Error::InvalidOption(format!(
                "index_cap {} exceeds {}",
                self.index_cap, MAX_INDEX_CAP
            )));
        }
        if self.contents_lookahead == 0 {
            return Err(Error::InvalidOption(
                "contents_lookahead must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            min_paragraph_len: 20,
            heading: HeadingWindow::default(),
            boilerplate_patterns: Vec::new(),
            builtin_boilerplate: true,
            skip_front_matter: false,
            front_matter_pages: 10,
            contents_lookahead: 50,
            index_cap: 30,
            parallel: true,
        }
    }
}

/// Length bounds used by the heading heuristics, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingWindow {
    /// Title-cased section candidates must be longer than this
    pub min_len: usize,

    /// Heading candidates must be shorter than this
    pub max_len: usize,

    /// All-caps section candidates must be longer than this
    pub caps_min_len: usize,

    /// The next line must be longer than this to confirm a title
    pub confirm_len: usize,
}

impl HeadingWindow {
    /// Create a window with the given bounds and default caps/confirmation lengths.
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self {
            min_len,
            max_len,
            ..Default::default()
        }
    }

    /// Whether `len` lies strictly inside `(min_len, max_len)`.
    pub fn contains(&self, len: usize) -> bool {
        len > self.min_len && len < self.max_len
    }

    /// Check that the window is not empty.
    pub fn validate(&self) -> Result<()> {
        if self.max_len == 0 {
            return Err(Error::InvalidOption("heading max_len must be positive".into()));
        }
        if self.min_len >= self.max_len {
            return Err(Error::InvalidOption(format!(
                "heading window is empty: min_len {} >= max_len {}",
                self.min_len, self.max_len
            )));
        }
        if self.caps_min_len >= self.max_len {
            return Err(Error::InvalidOption(format!(
                "heading caps_min_len {} >= max_len {}",
                self.caps_min_len, self.max_len
            )));
        }
        Ok(())
    }
}

impl Default for HeadingWindow {
    fn default() -> Self {
        Self {
            min_len: 10,
            max_len: 50,
            caps_min_len: 5,
            confirm_len: 50,
        }
    }
}
