//! Paragraph reflow.
//!
//! OCR output breaks paragraphs at the physical line width of the page. The
//! buffer collects consecutive fragments and joins them back with single
//! spaces once something structural interrupts the run.

/// Accumulates paragraph fragments until flushed.
#[derive(Debug, Clone, Default)]
pub struct ParagraphBuffer {
    fragments: Vec<String>,
    discarded: u32,
}

impl ParagraphBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment. Empty fragments are ignored.
    pub fn push(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if !fragment.is_empty() {
            self.fragments.push(fragment.to_string());
        }
    }

    /// Check if no fragments are pending.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of pending fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Join pending fragments and clear the buffer.
    ///
    /// Returns `None` when the buffer was empty or the joined text is not
    /// longer than `min_len` characters; in the latter case the text is lost
    /// and counted as discarded.
    pub fn flush(&mut self, min_len: usize) -> Option<String> {
        if self.fragments.is_empty() {
            return None;
        }

        let joined = self.fragments.join(" ");
        self.fragments.clear();

        if joined.chars().count() > min_len {
            Some(joined)
        } else {
            log::trace!("Discarding short paragraph: {:?}", joined);
            self.discarded += 1;
            None
        }
    }

    /// Number of flushes that dropped their text for being too short.
    pub fn discarded(&self) -> u32 {
        self.discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflow_joins_with_single_spaces() {
        let mut buffer = ParagraphBuffer::new();
        buffer.push("Esta é a primeira linha de um parágrafo que foi quebrado");
        buffer.push("pelo OCR em várias linhas diferentes.");
        assert_eq!(buffer.len(), 2);

        assert_eq!(
            buffer.flush(20).as_deref(),
            Some(
                "Esta é a primeira linha de um parágrafo que foi quebrado \
                 pelo OCR em várias linhas diferentes."
            )
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_short_paragraph_is_discarded() {
        let mut buffer = ParagraphBuffer::new();
        buffer.push("Ok.");
        assert_eq!(buffer.flush(20), None);
        assert!(buffer.is_empty());
        assert_eq!(buffer.discarded(), 1);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut buffer = ParagraphBuffer::new();
        buffer.push("exatamente vinte ch.");
        assert_eq!(buffer.flush(20), None);

        buffer.push("exatamente vinte chr.");
        assert!(buffer.flush(20).is_some());
    }

    #[test]
    fn test_threshold_counts_characters() {
        // 21 characters, more than 21 bytes
        let mut buffer = ParagraphBuffer::new();
        buffer.push("ação ação ação ação a");
        assert_eq!(buffer.flush(20).as_deref(), Some("ação ação ação ação a"));
    }

    #[test]
    fn test_flush_empty_buffer() {
        let mut buffer = ParagraphBuffer::new();
        buffer.push("   ");
        assert!(buffer.is_empty());
        assert_eq!(buffer.flush(0), None);
        assert_eq!(buffer.discarded(), 0);
    }
}
