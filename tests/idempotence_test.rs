//! Idempotence tests for mprettier
//!
//! Formatting output applied to a document, then formatting again, must
//! yield zero further edits. These tests run the full pipeline twice over
//! representative scripts and compare.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use mprettier::alias::builtin;
use mprettier::format::FormatOptions;
use mprettier::process::format_source;

/// Format twice and assert the second run is a no-op
fn assert_idempotent(input: &str, options: &FormatOptions) {
    let first = format_source(input, options, builtin());
    let second = format_source(&first.formatted, options, builtin());
    assert!(
        !second.changed(),
        "second run still produced {} edits\nafter first run:\n{}\nafter second run:\n{}",
        second.edit_count,
        first.formatted,
        second.formatted
    );
    assert_eq!(first.formatted, second.formatted);
}

#[test]
fn test_idempotent_simple_block() {
    assert_idempotent(
        "macro greet {\n  ECHO hello\n}\n",
        &FormatOptions::default(),
    );
}

#[test]
fn test_idempotent_nested_blocks() {
    assert_idempotent(
        "macro m {\n  if $x {\n  while $y {\n  echo deep\n  }\n  }\n}\n",
        &FormatOptions::default(),
    );
}

#[test]
fn test_idempotent_one_liner_else() {
    assert_idempotent(
        "  if $x {\n  echo a\n  } else {\n  echo b\n  }\n",
        &FormatOptions::default(),
    );
}

#[test]
fn test_idempotent_comments_and_blanks() {
    assert_idempotent(
        "///header\n// intro\nmacro m {\n  ; note\n   \n  #; other note\n}\n",
        &FormatOptions::default(),
    );
}

#[test]
fn test_idempotent_continuation_dots() {
    assert_idempotent(
        "macro m {\n  run build\n .  .   with flags\n . more\n}\n",
        &FormatOptions::default(),
    );
}

#[test]
fn test_idempotent_set_assignments() {
    assert_idempotent(
        "macro m {\n  set x=1\n  SET   %y.z  =2\n  set ^%flag   =   on\n}\n",
        &FormatOptions::default(),
    );
}

#[test]
fn test_idempotent_function_tokens() {
    assert_idempotent(
        "macro m {\n  echo $UPPER($Left($args, 3))\n  echo $$Literal $NOW\n}\n",
        &FormatOptions::default(),
    );
}

#[test]
fn test_idempotent_unbalanced_braces() {
    assert_idempotent("  }\n  }\n  echo hi\n}\n", &FormatOptions::default());
}

#[test]
fn test_idempotent_with_two_space_tabs() {
    let options = FormatOptions {
        tab_size: 2,
        insert_spaces: true,
    };
    assert_idempotent(
        "macro m {\n    if $x {\n        echo hi\n    }\n}\n",
        &options,
    );
}

#[test]
fn test_idempotent_tab_indented_mode() {
    let options = FormatOptions {
        tab_size: 4,
        insert_spaces: false,
    };
    assert_idempotent("macro m {\n\tECHO hi\n\t}\n", &options);
}

#[test]
fn test_idempotent_mixed_realistic_script() {
    let script = "\
///startup macro collection
// maintained by hand, formatting normalized by tool

macro startup {
  LOG starting
  set   %attempts=0
  while $exists($home) {
    inc %attempts
  if $len($args) {
  echo $Upper($word($args, 1))
  } else {
  echo $user
  }
   }
  RET
}

{
  echo anonymous block
}
";
    assert_idempotent(script, &FormatOptions::default());
}
