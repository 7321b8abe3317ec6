//! Read-only document model and text edits.
//!
//! A [`Document`] is an ordered sequence of lines addressed by index; an
//! [`Edit`] replaces one line/column [`Range`] with new text. The formatter
//! only ever produces edits, it never mutates the document. The caller
//! applies the whole batch in one transaction with [`apply_edits`], so
//! column offsets computed against the original text stay valid.

/// A line/column position. `col` is a byte offset into the line's UTF-8 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// A half-open range `[start, end)` within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Range covering `[start_col, end_col)` on a single line.
    #[must_use]
    pub fn on_line(line: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            start: Position::new(line, start_col),
            end: Position::new(line, end_col),
        }
    }
}

/// A single text replacement: the characters in `range` become `new_text`.
///
/// Edits produced for the same line always target disjoint column ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range,
    pub new_text: String,
}

impl Edit {
    #[must_use]
    pub fn new(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }
}

/// An immutable view of a script as an ordered sequence of lines.
///
/// Lines are split on `\n`; a trailing `\r` is stripped so that column
/// offsets always address line content.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Build a document from raw text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        Self { lines }
    }

    /// Number of lines in the document.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Raw text of line `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn line(&self, index: usize) -> &str {
        &self.lines[index]
    }

    /// Range covering the entire content of line `index` (excluding the
    /// line terminator).
    #[must_use]
    pub fn full_line_range(&self, index: usize) -> Range {
        Range::on_line(index, 0, self.lines[index].len())
    }

    /// Iterate over `(index, text)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().enumerate().map(|(i, l)| (i, l.as_str()))
    }
}

/// Apply a batch of edits to `text` in one transaction.
///
/// All ranges are interpreted against the original text. Ranges must be
/// disjoint (the formatter guarantees this); edits are spliced back to
/// front so earlier offsets stay valid.
#[must_use]
pub fn apply_edits(text: &str, edits: &[Edit]) -> String {
    if edits.is_empty() {
        return text.to_string();
    }

    // Byte offset of the start of each line in the original text.
    let mut line_starts = vec![0usize];
    for (pos, b) in text.bytes().enumerate() {
        if b == b'\n' {
            line_starts.push(pos + 1);
        }
    }

    let abs = |p: Position| -> usize { line_starts.get(p.line).map_or(text.len(), |s| s + p.col) };

    let mut sorted: Vec<&Edit> = edits.iter().collect();
    sorted.sort_by_key(|e| (e.range.start.line, e.range.start.col));

    let mut result = text.to_string();
    for edit in sorted.iter().rev() {
        let start = abs(edit.range.start).min(result.len());
        let end = abs(edit.range.end).min(result.len());
        result.replace_range(start..end, &edit.new_text);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lines() {
        let doc = Document::new("one\ntwo\nthree");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(0), "one");
        assert_eq!(doc.line(2), "three");
    }

    #[test]
    fn test_document_strips_carriage_return() {
        let doc = Document::new("one\r\ntwo\r\n");
        assert_eq!(doc.line(0), "one");
        assert_eq!(doc.line(1), "two");
        // Trailing newline yields a final empty line
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(2), "");
    }

    #[test]
    fn test_full_line_range() {
        let doc = Document::new("hello\nworld");
        let range = doc.full_line_range(1);
        assert_eq!(range.start, Position::new(1, 0));
        assert_eq!(range.end, Position::new(1, 5));
    }

    #[test]
    fn test_apply_single_edit() {
        let text = "  echo hi\n";
        let edits = vec![Edit::new(Range::on_line(0, 0, 2), "    ")];
        assert_eq!(apply_edits(text, &edits), "    echo hi\n");
    }

    #[test]
    fn test_apply_multiple_edits_same_line() {
        let text = "  ECHO hi\n";
        let edits = vec![
            Edit::new(Range::on_line(0, 0, 2), "    "),
            Edit::new(Range::on_line(0, 2, 6), "echo"),
        ];
        assert_eq!(apply_edits(text, &edits), "    echo hi\n");
    }

    #[test]
    fn test_apply_edits_out_of_order() {
        // Application must not depend on the order edits were produced
        let text = "aaa bbb\n";
        let edits = vec![
            Edit::new(Range::on_line(0, 4, 7), "B"),
            Edit::new(Range::on_line(0, 0, 3), "A"),
        ];
        assert_eq!(apply_edits(text, &edits), "A B\n");
    }

    #[test]
    fn test_apply_multiline_insertion() {
        let text = "  } else {\n";
        let edits = vec![Edit::new(Range::on_line(0, 3, 4), "\n")];
        assert_eq!(apply_edits(text, &edits), "  }\nelse {\n");
    }

    #[test]
    fn test_apply_no_edits() {
        assert_eq!(apply_edits("abc", &[]), "abc");
    }

    #[test]
    fn test_apply_blank_line_deletion() {
        let text = "echo\n   \ndone\n";
        let edits = vec![Edit::new(Range::on_line(1, 0, 3), "")];
        assert_eq!(apply_edits(text, &edits), "echo\n\ndone\n");
    }
}
