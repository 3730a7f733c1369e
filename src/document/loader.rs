//! Document Loading
//!
//! Loads a pre-parsed document tree (JSON emitted by the external parser)
//! and the raw source lines the End-Line Resolver scans. The tree and the
//! lines are loaded once per file and shared read-only.

use std::path::Path;

use anyhow::{Context, Result};

use super::ast::Document;

/// The raw source lines of one file, 1-based and immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLines {
    lines: Vec<String>,
}

impl SourceLines {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read source file {}", path.display()))?;
        Ok(Self::from_text(&text))
    }

    /// Get line `n` (1-based). Returns `None` past end of file.
    pub fn get(&self, n: u32) -> Option<&str> {
        if n == 0 {
            return None;
        }
        self.lines.get(n as usize - 1).map(String::as_str)
    }

    /// Number of lines in the file.
    pub fn len(&self) -> u32 {
        self.lines.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 1-based line number of the last line, or 1 for an empty file.
    pub fn last_line(&self) -> u32 {
        self.len().max(1)
    }
}

/// Load a parsed document tree from a JSON file.
pub fn load_tree(path: &Path) -> Result<Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document tree {}", path.display()))?;
    parse_tree(&text).with_context(|| format!("invalid document tree in {}", path.display()))
}

/// Parse a document tree from JSON text.
pub fn parse_tree(json: &str) -> Result<Document> {
    let doc: Document = serde_json::from_str(json)?;
    Ok(doc)
}
