//! Alias table construction and canonical spelling lookup.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::error::Result;

/// The three independent lookup vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    Commands,
    Functions,
    Variables,
}

/// One vocabulary record: a canonical label and its recognized spellings.
///
/// Aliases are stored uppercase in the data files; lookup uppercases the
/// probed token, so matching is case-insensitive and exact (no prefixes).
#[derive(Debug, Clone, Deserialize)]
pub struct AliasEntry {
    pub label: String,
    #[serde(default)]
    pub alias: Vec<String>,
}

/// Inverted index over one vocabulary: uppercase alias -> canonical label.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    index: HashMap<String, String>,
}

impl AliasTable {
    /// Build a table from entries, rejecting duplicate aliases.
    ///
    /// An alias mapping to two canonical labels is a data error; it is
    /// reported at load time rather than silently resolved.
    pub fn from_entries(entries: &[AliasEntry]) -> Result<Self> {
        let mut index = HashMap::new();
        for entry in entries {
            for alias in &entry.alias {
                let key = alias.to_uppercase();
                if let Some(previous) = index.insert(key.clone(), entry.label.clone()) {
                    if previous != entry.label {
                        bail!(
                            "alias {key:?} maps to both {previous:?} and {:?}",
                            entry.label
                        );
                    }
                }
            }
        }
        Ok(Self { index })
    }

    /// Parse a JSON array of `{label, alias: [..]}` records into a table.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<AliasEntry> =
            serde_json::from_str(json).context("invalid alias table JSON")?;
        Self::from_entries(&entries)
    }

    /// Look up the canonical label for a token, or `None` if the table has
    /// no opinion about it.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.index.get(&token.to_uppercase()).map(String::as_str)
    }

    /// Number of recognized aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// The full alias configuration: one table per vocabulary.
#[derive(Debug, Clone, Default)]
pub struct AliasSet {
    pub commands: AliasTable,
    pub functions: AliasTable,
    pub variables: AliasTable,
}

impl AliasSet {
    /// Resolve a token against a vocabulary.
    ///
    /// The `functions` lookup falls back to `variables`: both share the
    /// `$`-prefixed token syntax, so one scan probes both tables.
    #[must_use]
    pub fn resolve(&self, vocabulary: Vocabulary, token: &str) -> Option<&str> {
        match vocabulary {
            Vocabulary::Commands => self.commands.resolve(token),
            Vocabulary::Functions => self
                .functions
                .resolve(token)
                .or_else(|| self.variables.resolve(token)),
            Vocabulary::Variables => self.variables.resolve(token),
        }
    }

    /// Load all three tables from JSON files in a directory
    /// (`commands.json`, `functions.json`, `variables.json`).
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let load = |name: &str| -> Result<AliasTable> {
            let path = dir.join(name);
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            AliasTable::from_json(&json)
                .with_context(|| format!("failed to load {}", path.display()))
        };
        Ok(Self {
            commands: load("commands.json")?,
            functions: load("functions.json")?,
            variables: load("variables.json")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, aliases: &[&str]) -> AliasEntry {
        AliasEntry {
            label: label.to_string(),
            alias: aliases.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_resolve_exact_case_insensitive() {
        let table = AliasTable::from_entries(&[entry("echo", &["ECHO"])]).unwrap();
        assert_eq!(table.resolve("ECHO"), Some("echo"));
        assert_eq!(table.resolve("Echo"), Some("echo"));
        assert_eq!(table.resolve("echo"), Some("echo"));
    }

    #[test]
    fn test_resolve_no_prefix_match() {
        let table = AliasTable::from_entries(&[entry("echo", &["ECHO"])]).unwrap();
        assert_eq!(table.resolve("ECH"), None);
        assert_eq!(table.resolve("ECHOO"), None);
    }

    #[test]
    fn test_resolve_unknown_token() {
        let table = AliasTable::from_entries(&[entry("echo", &["ECHO"])]).unwrap();
        assert_eq!(table.resolve("frobnicate"), None);
    }

    #[test]
    fn test_multiple_aliases_one_label() {
        let table = AliasTable::from_entries(&[entry("return", &["RETURN", "RET"])]).unwrap();
        assert_eq!(table.resolve("ret"), Some("return"));
        assert_eq!(table.resolve("Return"), Some("return"));
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let result = AliasTable::from_entries(&[
            entry("echo", &["ECHO", "PRINT"]),
            entry("println", &["PRINT"]),
        ]);
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("PRINT"), "unexpected error: {message}");
    }

    #[test]
    fn test_duplicate_alias_same_label_allowed() {
        let table = AliasTable::from_entries(&[
            entry("echo", &["ECHO"]),
            entry("echo", &["ECHO"]),
        ])
        .unwrap();
        assert_eq!(table.resolve("echo"), Some("echo"));
    }

    #[test]
    fn test_from_json() {
        let table =
            AliasTable::from_json(r#"[{"label": "$time", "alias": ["$TIME", "$NOW"]}]"#).unwrap();
        assert_eq!(table.resolve("$NOW"), Some("$time"));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(AliasTable::from_json("{not json").is_err());
    }

    #[test]
    fn test_functions_fall_back_to_variables() {
        let set = AliasSet {
            commands: AliasTable::default(),
            functions: AliasTable::from_entries(&[entry("$upper", &["$UPPER"])]).unwrap(),
            variables: AliasTable::from_entries(&[entry("$home", &["$HOME"])]).unwrap(),
        };
        assert_eq!(set.resolve(Vocabulary::Functions, "$UPPER"), Some("$upper"));
        assert_eq!(set.resolve(Vocabulary::Functions, "$Home"), Some("$home"));
        assert_eq!(set.resolve(Vocabulary::Variables, "$UPPER"), None);
    }
}
