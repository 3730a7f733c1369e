//! Container Adapter
//!
//! Presents a uniform "ordered list of child blocks" view over the two kinds
//! of block-holding nodes: a whole document, or a section. Pure reads, no
//! side effects.

use crate::document::{Document, Node};

/// A node that holds an ordered list of child blocks.
#[derive(Debug, Clone, Copy)]
pub enum Container<'a> {
    Document(&'a Document),
    Section(&'a Node),
}

impl<'a> Container<'a> {
    pub fn title(&self) -> Option<&'a str> {
        match self {
            Container::Document(doc) => doc.title.as_deref(),
            Container::Section(node) => node.title.as_deref(),
        }
    }

    /// 1-based line the container starts on: the document title line, or the
    /// section heading line.
    pub fn start_line(&self) -> u32 {
        match self {
            Container::Document(_) => 1,
            Container::Section(node) => node.start_line().unwrap_or(1),
        }
    }

    /// Human-readable label for diagnostic messages.
    pub fn label(&self) -> String {
        match self {
            Container::Document(_) => "document".to_string(),
            Container::Section(node) => match node.title.as_deref() {
                Some(title) => format!("section '{title}'"),
                None => "section".to_string(),
            },
        }
    }

    fn raw_children(&self) -> &'a [Node] {
        match self {
            Container::Document(doc) => &doc.blocks,
            Container::Section(node) => &node.blocks,
        }
    }

    /// Direct child sections, for recursive validation.
    pub fn sections(&self) -> Vec<&'a Node> {
        self.raw_children().iter().filter(|n| n.is_section()).collect()
    }
}

/// The container's direct child blocks in document order.
///
/// For a document: if an implicit preamble wrapper is present its children
/// fully replace top-level enumeration; otherwise all children preceding the
/// first subsection are used. For a section: all direct children excluding
/// subsections, which are validated recursively instead.
pub fn list_children<'a>(container: &Container<'a>) -> Vec<&'a Node> {
    match container {
        Container::Document(doc) => {
            if let Some(preamble) = doc.blocks.iter().find(|n| n.is_preamble()) {
                return preamble.blocks.iter().collect();
            }
            doc.blocks
                .iter()
                .take_while(|n| !n.is_section())
                .collect()
        }
        Container::Section(node) => node
            .blocks
            .iter()
            .filter(|n| !n.is_section())
            .collect(),
    }
}
