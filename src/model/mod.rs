//! Document model types for formatted transcriptions.
//!
//! This module defines the intermediate representation that bridges line
//! classification and Markdown rendering: classified lines, the structural
//! elements built from them, and the document that owns the result.

mod document;
mod element;
mod line;

pub use document::{Document, Metadata};
pub use element::{IndexEntry, StructuralElement};
pub use line::{ClassifiedLine, Tag};
