//! Transcription parsing module.
//!
//! Raw text flows through the artifact filter, the line classifier and the
//! structural emitter; the index is built afterwards from emitted headings.

mod artifact;
mod classifier;
mod emitter;
mod engine;
mod index;
mod options;
mod reflow;

pub use artifact::{normalize_line, ArtifactFilter, DropReason, PageContext, Verdict};
pub use classifier::{contents_block_len, harvest_contents, title_case, LineClassifier, LineInput};
pub use emitter::{Emission, Emitter};
pub use engine::TranscriptParser;
pub use index::build_index;
pub use options::{HeadingWindow, ParseOptions};
pub use reflow::ParagraphBuffer;
