//! Built-in vocabularies embedded at compile time.
//!
//! The default tables ship inside the binary; `--tables <DIR>` swaps in
//! external JSON files instead.

use std::sync::LazyLock;

use crate::alias::table::{AliasSet, AliasTable};

const COMMANDS_JSON: &str = include_str!("../../data/commands.json");
const FUNCTIONS_JSON: &str = include_str!("../../data/functions.json");
const VARIABLES_JSON: &str = include_str!("../../data/variables.json");

/// The embedded vocabularies, parsed once at first access.
///
/// # Panics
///
/// Panics if the embedded data is malformed. This is acceptable because the
/// data files are compile-time constants verified by tests.
static BUILTIN: LazyLock<AliasSet> = LazyLock::new(|| AliasSet {
    commands: AliasTable::from_json(COMMANDS_JSON)
        .unwrap_or_else(|e| panic!("invalid embedded commands table: {e}")),
    functions: AliasTable::from_json(FUNCTIONS_JSON)
        .unwrap_or_else(|e| panic!("invalid embedded functions table: {e}")),
    variables: AliasTable::from_json(VARIABLES_JSON)
        .unwrap_or_else(|e| panic!("invalid embedded variables table: {e}")),
});

/// Access the built-in alias tables.
#[must_use]
pub fn builtin() -> &'static AliasSet {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::table::Vocabulary;

    #[test]
    fn test_builtin_tables_load() {
        let set = builtin();
        assert!(!set.commands.is_empty());
        assert!(!set.functions.is_empty());
        assert!(!set.variables.is_empty());
    }

    #[test]
    fn test_builtin_command_lookup() {
        let set = builtin();
        assert_eq!(set.resolve(Vocabulary::Commands, "ECHO"), Some("echo"));
        assert_eq!(set.resolve(Vocabulary::Commands, "Set"), Some("set"));
    }

    #[test]
    fn test_builtin_function_lookup() {
        let set = builtin();
        assert_eq!(set.resolve(Vocabulary::Functions, "$ECHO"), Some("$echo"));
        assert_eq!(set.resolve(Vocabulary::Functions, "$Upper"), Some("$upper"));
        // Variables are reachable through the functions vocabulary
        assert_eq!(set.resolve(Vocabulary::Functions, "$HOME"), Some("$home"));
    }
}
