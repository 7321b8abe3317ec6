//! mprettier - Auto-formatter for brace-structured macro scripts
//!
//! Computes minimal text edits that normalize indentation, comment
//! alignment, command/function casing and `set` assignment spacing.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod alias;
pub mod cli;
pub mod config;
pub mod directive;
pub mod document;
pub mod error;
pub mod format;
pub mod parser;
pub mod process;

// Re-export commonly used types
pub use alias::{AliasSet, AliasTable, Vocabulary};
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use directive::{find_directive, parse_directive, DirectiveOverrides};
pub use document::{apply_edits, Document, Edit, Position, Range};
pub use error::Result;
pub use format::{format_document, format_document_cancellable, CancelFlag, FormatOptions};
