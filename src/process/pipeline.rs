//! Text-level formatting pipeline.

use crate::alias::AliasSet;
use crate::document::{apply_edits, Document};
use crate::format::{format_document, FormatOptions};

/// Result of formatting one piece of source text.
#[derive(Debug, Clone)]
pub struct FormatOutcome {
    /// The text with all edits applied.
    pub formatted: String,
    /// How many edits were applied. Zero means the input was already
    /// formatted.
    pub edit_count: usize,
}

impl FormatOutcome {
    /// Whether applying the edits changed anything.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.edit_count > 0
    }
}

/// Format a whole script: compute the edit set and apply it atomically.
#[must_use]
pub fn format_source(text: &str, options: &FormatOptions, aliases: &AliasSet) -> FormatOutcome {
    let document = Document::new(text);
    let edits = format_document(&document, options, aliases);
    let formatted = apply_edits(text, &edits);
    FormatOutcome {
        formatted,
        edit_count: edits.len(),
    }
}
