//! Alias tables mapping recognized spellings to canonical display labels.
//!
//! Three independent vocabularies exist: commands, `$`-functions and
//! `$`-variables. Each table is an inverted index from an uppercase alias
//! to its canonical label, built once at load time and immutable after.

pub mod builtin;
pub mod table;

pub use builtin::builtin;
pub use table::{AliasEntry, AliasSet, AliasTable, Vocabulary};
