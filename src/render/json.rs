//! JSON export of a formatted transcription.
//!
//! The whole [`Document`] is serialized: `metadata` (title, author, source
//! file, page range), the harvested `contents` lines, the `index` entries,
//! `stats`, and the `body` as an array of elements tagged by `kind`:
//!
//! ```json
//! {"kind":"heading","level":2,"text":"PARTE UM"}
//! {"kind":"paragraph","text":"Na primavera de 2008, ..."}
//! {"kind":"footnote","text":"Pesquisa publicada em 2017."}
//! {"kind":"break"}
//! ```

use crate::error::{Error, Result};
use crate::model::Document;

/// Layout of the exported JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Indented, one field per line
    #[default]
    Pretty,
    /// Single line
    Compact,
}

/// Serialize a formatted document.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    }
    .map_err(|e| Error::Render(format!("cannot export document as JSON: {}", e)))
}
