//! Rendering module for turning formatted documents into Markdown or JSON.

mod json;
mod markdown;
mod normalize;
mod options;
mod result;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use normalize::{collapse_blank_lines, normalize, space_headings};
pub use options::{RenderOptions, DEFAULT_CONTENTS_CAP};
pub use result::{FormatStats, RenderResult};
