//! Parsed Document Tree
//!
//! Read-only data model for a document tree produced by an external AsciiDoc
//! parser. No validation logic lives here - pure data representation plus
//! the accessors the engine needs (context/style tags, attributes, titles,
//! child lists, start lines).

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// A whole parsed document: title, header attributes, top-level blocks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
    #[serde(default)]
    pub blocks: Vec<Node>,
}

/// One node of the parsed tree (block, section, preamble, list, ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    /// Structural context tag (e.g. "paragraph", "listing", "section").
    pub context: String,
    /// Optional style tag (e.g. "verse", "source", "NOTE").
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
    #[serde(default)]
    pub blocks: Vec<Node>,
    #[serde(default)]
    pub location: Option<SourceSpan>,
}

/// Source position of a node, 1-based. The external parser is only required
/// to provide a starting line; the end line is re-derived when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SourceSpan {
    pub start_line: u32,
    #[serde(default)]
    pub end_line: Option<u32>,
}

impl Node {
    /// Look up an attribute by name, as a string.
    ///
    /// Non-string scalar values (numbers, booleans) are not distinguished by
    /// any structural check, so only string attributes are surfaced.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// Whether the attribute is present at all, regardless of value type.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// 1-based starting line of this node, if the parser recorded one.
    pub fn start_line(&self) -> Option<u32> {
        self.location.map(|loc| loc.start_line)
    }

    /// Whether this node is a section (a nested container).
    pub fn is_section(&self) -> bool {
        self.context == "section"
    }

    /// Whether this node is the implicit preamble wrapper that holds a
    /// document's front matter before its first section.
    pub fn is_preamble(&self) -> bool {
        self.context == "preamble"
    }
}
