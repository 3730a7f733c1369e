//! AsciiDoc Structure Lint
//!
//! Validates the structure of a parsed AsciiDoc document against a
//! declarative rule set, producing diagnostics with precise source
//! locations.
//!
//! This library provides:
//! - A read-only model for externally parsed document trees
//! - TOML rule sets (cardinality, ordering, field checks)
//! - The structural validation engine
//! - Text and JSON diagnostic reports

pub mod config;
pub mod diagnostics;
pub mod document;
pub mod report;
pub mod rules;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use diagnostics::{Diagnostic, Severity};
pub use document::{Document, SourceLines};
pub use rules::RuleSet;
pub use validation::{resolve_end_line, validate_container, validate_document, BlockKind};
