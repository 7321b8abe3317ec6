/// Regex patterns for macro script syntax
///
/// All patterns are compiled once at startup using `LazyLock`.
///
/// All regexes use case-insensitive + unicode flags
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Build a case-insensitive regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. This is acceptable because all patterns
/// in this module are compile-time constants that are verified by tests.
/// The panic occurs at first access of the `LazyLock` static.
fn build_re(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .unicode(true)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

// ===== COMMENTS =====

// Comment line: leading whitespace, then a slash run (`//`, `///`, ...),
// a hash run terminated by `;` (`#;`, `##;`), or a bare `;`.
// Group 1: leading whitespace. Group 2: the comment marker.
pub static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^(\s*)(//+|#+;\s*|;)"));

// ===== CONTINUATION DOTS =====

// One or more leading continuation dots, each optionally trailed by spaces.
// The whole match is the run to be rewritten into a fixed column rhythm.
pub static DOTS_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^\s+(\.\s*)+"));

// ===== BRACES =====

// Closing brace after leading whitespace, with anything trailing it.
// Group 1: leading whitespace. Group 2: trailing text after the brace.
// A `}` at column 0 deliberately does not match.
pub static CLOSE_BRACE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^(\s+)\}(.*)$"));

// ===== COMMAND STATEMENTS =====

// Indented command word, optionally behind continuation dots.
// Group 1: leading whitespace/dot run. Group 2: the command word.
// The trailing \b excludes words glued to digits or underscores.
pub static COMMAND_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^(\s+[\s.]*)([a-z]+)\b"));

// `set <dotted-identifier> = ` assignment, identifier optionally prefixed
// with `^` and/or `%`. Group 1: the assignment operator run around `=`.
pub static SET_ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(r"^\s+(?:\.\s*)*set\s+(?:\^?%?(?:[a-z][a-z0-9]*)(?:\.[a-z][a-z0-9]*)*)(\s*=\s*)")
});

// ===== DEPTH TRANSITIONS =====

// A new top-level statement or block root: word character or `{` at column 0.
pub static TOP_LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"^(\w+|\{)"));

// ===== FUNCTION / VARIABLE TOKENS =====

// A `$`-prefixed alphabetic token. Escaping (`$$name`) is detected by the
// scanner checking the byte before each match; the regex crate has no
// look-behind.
pub static FUNCTION_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\$[a-z]+\b"));

// ===== DIRECTIVES =====

// In-file configuration directive inside any comment style:
//   ; mprettier: --tab-size 2
pub static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^\s*(?://+|#+;|;)\s*mprettier:\s*(.*?)\s*$"));
