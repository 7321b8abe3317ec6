//! File processing and formatting pipeline.
//!
//! Orchestrates one formatting run over a piece of source text:
//!
//! - Build the read-only [`crate::document::Document`] view
//! - Compute the edit set (structural pass, then `$`-token pass)
//! - Apply all edits in one transaction against the original text
//!
//! The main entry point is [`format_source`], used by the CLI for files and
//! stdin alike.

pub mod pipeline;

pub use pipeline::{format_source, FormatOutcome};
