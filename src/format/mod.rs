//! Macro script formatting.
//!
//! This module contains the core formatting logic organized into submodules:
//! - [`classify`]: Per-line structural classification (blank/comment/dots/brace/command)
//! - [`indent`]: Depth-tracking scan producing indentation and casing edits
//! - [`functions`]: Stateless scan canonicalizing `$`-prefixed tokens
//! - [`engine`]: The driver combining both passes into one edit sequence

pub mod classify;
pub mod engine;
pub mod functions;
pub mod indent;

pub use engine::{format_document, format_document_cancellable, CancelFlag, FormatOptions};
pub use indent::process_line;
