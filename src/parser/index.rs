//! Index building over emitted headings.

use crate::model::{IndexEntry, StructuralElement};

/// Collect headings in emission order, keeping at most `cap` entries.
///
/// Runs after emission is complete and never modifies the body.
pub fn build_index(body: &[StructuralElement], cap: usize) -> Vec<IndexEntry> {
    body.iter()
        .filter_map(|element| match element {
            StructuralElement::Heading { level, text } => Some(IndexEntry::new(*level, text.clone())),
            _ => None,
        })
        .take(cap)
        .collect()
}
