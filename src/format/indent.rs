//! Depth-tracking structural scan.
//!
//! [`process_line`] is one step of a left-to-right fold over the document:
//! it takes the depth in effect for the current line and returns the depth
//! for the next line together with the edits produced. Categories apply in
//! a fixed priority order; blank and comment lines consume the whole line,
//! every other category falls through to the next.

use crate::alias::{AliasSet, Vocabulary};
use crate::document::{Edit, Range};
use crate::format::classify::{self, DepthChange};
use crate::format::engine::FormatOptions;

/// Scan one line at the given depth; returns `(next_depth, edits)`.
///
/// `depth` is the brace-nesting level in effect for this line (1 at the top
/// of a document). The expected indentation of an indented line is
/// `tab_size * depth` spaces. Whitespace edits are suppressed when
/// `insert_spaces` is off; casing and assignment edits are not.
#[must_use]
pub fn process_line(
    index: usize,
    line: &str,
    depth: usize,
    options: &FormatOptions,
    aliases: &AliasSet,
) -> (usize, Vec<Edit>) {
    let mut edits = Vec::new();

    // Whitespace-only lines are emptied outright, whatever the depth.
    if classify::is_blank(line) {
        edits.push(Edit::new(Range::on_line(index, 0, line.len()), ""));
        return (depth, edits);
    }

    // Comment lines consume the rest of line processing and leave depth
    // untouched, even if the comment text contains braces.
    if let Some(c) = classify::comment(line) {
        let target = if c.is_doc_header() {
            String::new()
        } else {
            " ".repeat(options.tab_size * depth)
        };
        if options.insert_spaces && target != c.leading {
            edits.push(Edit::new(
                Range::on_line(index, 0, c.leading.len()),
                target,
            ));
        }
        return (depth, edits);
    }

    let mut depth = depth;

    // Continuation dots: one tab of lead-in, then each dot padded to the
    // tab width. Brace and command rules still apply to the same line.
    if let Some(run) = classify::continuation_dots(line) {
        let mut target = " ".repeat(options.tab_size);
        for _ in 0..run.count {
            target.push('.');
            for _ in 1..options.tab_size {
                target.push(' ');
            }
        }
        if options.insert_spaces && target != line[..run.len] {
            edits.push(Edit::new(Range::on_line(index, 0, run.len), target));
        }
    }

    // Closing brace: the brace belongs to the level it closes into, so the
    // depth drops before its indent is computed. Anything trailing the
    // brace moves to its own line at the new depth.
    if let Some(brace) = classify::closing_brace(line) {
        depth = depth.saturating_sub(1);
        let indent = " ".repeat(options.tab_size * depth);
        if options.insert_spaces {
            if indent != line[..brace.leading_len] {
                edits.push(Edit::new(
                    Range::on_line(index, 0, brace.leading_len),
                    indent.clone(),
                ));
            }
            if brace.has_trailing {
                edits.push(Edit::new(
                    Range::on_line(
                        index,
                        brace.after_brace,
                        brace.after_brace + brace.separator_len,
                    ),
                    format!("\n{indent}"),
                ));
            }
        }
    }

    // Command statement: re-indent (unless behind continuation dots),
    // canonicalize the command word, and normalize `set x = ` spacing.
    if let Some(cmd) = classify::command_word(line) {
        if !cmd.leading.contains('.') {
            let target = " ".repeat(options.tab_size * depth);
            if options.insert_spaces && target != cmd.leading {
                edits.push(Edit::new(
                    Range::on_line(index, 0, cmd.leading.len()),
                    target,
                ));
            }
        }
        if let Some(label) = aliases.resolve(Vocabulary::Commands, cmd.word) {
            if label != cmd.word {
                edits.push(Edit::new(
                    Range::on_line(index, cmd.word_start, cmd.word_end),
                    label,
                ));
            }
        }
        if let Some((start, end)) = classify::set_assignment(line) {
            if &line[start..end] != " = " {
                edits.push(Edit::new(Range::on_line(index, start, end), " = "));
            }
        }
    }

    // Depth transition for the next line, judged on the original text.
    depth = match classify::depth_transition(line) {
        DepthChange::Reset => 1,
        DepthChange::Open => depth + 1,
        DepthChange::None => depth,
    };

    (depth, edits)
}
