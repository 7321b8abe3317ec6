//! Formatting driver.
//!
//! Runs the depth-tracking structural scan over the whole document, then
//! the stateless `$`-token scan, and concatenates the two edit sequences
//! (structural edits first). Formatting never fails: unrecognized lines
//! simply contribute no edits, and an empty document yields an empty list.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::alias::AliasSet;
use crate::document::{Document, Edit};
use crate::format::{functions, indent};

/// External formatting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Spaces per indentation level.
    pub tab_size: usize,
    /// When false the document is tab-indented; classification and depth
    /// tracking still run, but no whitespace edits are emitted.
    pub insert_spaces: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            insert_spaces: true,
        }
    }
}

/// Cooperative cancellation flag, checked between lines.
///
/// Cloning shares the flag. When raised, the driver stops and returns the
/// edits accumulated so far; edits are independent, so applying a partial
/// batch only leaves the document partially reformatted, never broken.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Compute the full edit set for a document.
#[must_use]
pub fn format_document(document: &Document, options: &FormatOptions, aliases: &AliasSet) -> Vec<Edit> {
    format_document_cancellable(document, options, aliases, &CancelFlag::new())
}

/// Compute edits, aborting early if `cancel` is raised.
#[must_use]
pub fn format_document_cancellable(
    document: &Document,
    options: &FormatOptions,
    aliases: &AliasSet,
    cancel: &CancelFlag,
) -> Vec<Edit> {
    let mut edits = Vec::new();

    let mut depth = 1usize;
    for (index, line) in document.iter() {
        if cancel.is_cancelled() {
            return edits;
        }
        let (next_depth, line_edits) = indent::process_line(index, line, depth, options, aliases);
        depth = next_depth;
        edits.extend(line_edits);
    }

    for (index, line) in document.iter() {
        if cancel.is_cancelled() {
            return edits;
        }
        edits.extend(functions::scan_tokens(index, line, aliases));
    }

    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::builtin;
    use crate::document::apply_edits;

    fn format(text: &str) -> Vec<Edit> {
        format_document(&Document::new(text), &FormatOptions::default(), builtin())
    }

    #[test]
    fn test_empty_document() {
        assert!(format("").is_empty());
    }

    #[test]
    fn test_single_line_document() {
        assert!(format("echo hi").is_empty());
    }

    #[test]
    fn test_structural_edits_precede_token_edits() {
        let edits = format("  ECHO $Echo\n");
        // Indent + command casing from the first pass, then the token edit
        assert_eq!(edits.len(), 3);
        assert_eq!(edits[0].new_text, "    ");
        assert_eq!(edits[1].new_text, "echo");
        assert_eq!(edits[2].new_text, "$echo");
    }

    #[test]
    fn test_block_indentation() {
        let text = "macro greet {\n  if $x {\n  echo hi\n  }\n}\n";
        let edits = format(text);
        let formatted = apply_edits(text, &edits);
        assert_eq!(
            formatted,
            "macro greet {\n    if $x {\n        echo hi\n    }\n}\n"
        );
    }

    #[test]
    fn test_unbalanced_braces_degrade_gracefully() {
        // Extra closers clamp at zero instead of underflowing
        let text = "  }\n  }\n  echo hi\n";
        let edits = format(text);
        let formatted = apply_edits(text, &edits);
        assert_eq!(formatted, "}\n}\necho hi\n");
    }

    #[test]
    fn test_cancelled_before_start_returns_empty() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let edits = format_document_cancellable(
            &Document::new("  ECHO hi\n"),
            &FormatOptions::default(),
            builtin(),
            &cancel,
        );
        assert!(edits.is_empty());
    }

    #[test]
    fn test_partial_edits_apply_cleanly() {
        // Any prefix of the edit list is a valid batch
        let text = "  ECHO $Echo\n";
        let edits = format(text);
        let partial = apply_edits(text, &edits[..1]);
        assert_eq!(partial, "    ECHO $Echo\n");
    }
}
