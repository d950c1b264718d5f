//! Gemfile parsing for supergemlock.
//!
//! Turns the line-oriented manifest DSL into a list of root
//! requirements plus the captured registry URL. The parser is tolerant
//! of malformed individual constraints (logged and skipped) but fails
//! the run on structurally unparseable lines.

pub mod lexer;
pub mod parser;

// Re-export main types
pub use lexer::{LexError, Token};
pub use parser::{parse_manifest, parse_manifest_str, Manifest};
