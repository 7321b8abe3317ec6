//! Inline directive parsing for `; mprettier:` comments
//!
//! Supports in-file configuration overrides via special comments in any of
//! the language's comment styles:
//! `; mprettier: --tab-size 2 --use-tabs`

use std::io::BufRead;

use crate::parser::patterns::DIRECTIVE_RE;

/// How far into a file directives are searched for.
const DIRECTIVE_SCAN_LINES: usize = 32;

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveOverrides {
    pub tab_size: Option<usize>,
    pub insert_spaces: Option<bool>,
}

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tab_size.is_none() && self.insert_spaces.is_none()
    }
}

/// Check if a line contains an mprettier directive
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    DIRECTIVE_RE.is_match(line)
}

/// Parse an mprettier directive line and return option overrides
///
/// # Arguments
/// * `line` - The line containing the directive
///
/// # Returns
/// * `Some(DirectiveOverrides)` if the line is a valid directive
/// * `None` if the line is not a directive
#[must_use]
pub fn parse_directive(line: &str) -> Option<DirectiveOverrides> {
    let caps = DIRECTIVE_RE.captures(line)?;
    let args_str = caps.get(1)?.as_str();

    Some(parse_directive_args(args_str))
}

/// Parse directive arguments into overrides
fn parse_directive_args(args_str: &str) -> DirectiveOverrides {
    let mut overrides = DirectiveOverrides::default();
    let tokens: Vec<&str> = args_str.split_whitespace().collect();
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            "-t" | "--tab-size" => {
                i += 1;
                if i < tokens.len() {
                    overrides.tab_size = tokens[i].parse().ok();
                }
            }
            "--use-tabs" => {
                overrides.insert_spaces = Some(false);
            }
            "--use-spaces" => {
                overrides.insert_spaces = Some(true);
            }
            _ => {}
        }
        i += 1;
    }

    overrides
}

/// Scan the head of a file for the first directive line.
///
/// Only the first [`DIRECTIVE_SCAN_LINES`] lines are considered; a
/// directive buried deeper in the file is ignored.
pub fn find_directive<R: BufRead>(reader: &mut R) -> Option<DirectiveOverrides> {
    for line in reader.lines().take(DIRECTIVE_SCAN_LINES) {
        let Ok(line) = line else {
            return None;
        };
        if let Some(overrides) = parse_directive(&line) {
            if !overrides.is_empty() {
                return Some(overrides);
            }
        }
    }
    None
}
