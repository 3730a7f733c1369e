//! Parsed Document Model
//!
//! Read-only surface over the external parser's output: the tree itself and
//! the raw source lines of the file it came from.

pub mod ast;
pub mod loader;

pub use ast::{Document, Node, SourceSpan};
pub use loader::{load_tree, parse_tree, SourceLines};
