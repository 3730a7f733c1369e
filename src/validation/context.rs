//! Validation Tracking Context
//!
//! Per-container accumulator: as blocks are visited in document order, each
//! gets a tracked record with a monotonically increasing sequence index.
//! Tracking is append-only; a context is constructed fresh per container and
//! discarded after that container's occurrence and order checks.

use std::collections::HashMap;

use crate::document::{Node, SourceLines};
use crate::rules::{Identity, RuleDescriptor};

/// One visited block: its governing descriptor, the node itself, and its
/// position in the container's traversal.
#[derive(Debug, Clone, Copy)]
pub struct TrackedBlock<'a> {
    pub descriptor: &'a RuleDescriptor,
    pub node: &'a Node,
    pub index: usize,
}

/// Per-container tracking state, plus read-only access to the source the
/// container came from (file name and raw lines) for diagnostic placement.
pub struct ValidationContext<'a> {
    file: &'a str,
    lines: &'a SourceLines,
    buckets: HashMap<Identity, Vec<usize>>,
    all: Vec<TrackedBlock<'a>>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(file: &'a str, lines: &'a SourceLines) -> Self {
        Self {
            file,
            lines,
            buckets: HashMap::new(),
            all: Vec::new(),
        }
    }

    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn lines(&self) -> &'a SourceLines {
        self.lines
    }

    /// Append a block with the next sequence index to its identity bucket
    /// and the flat order list. Append-only; there is no update or removal.
    pub fn track(&mut self, descriptor: &'a RuleDescriptor, node: &'a Node) {
        let index = self.all.len();
        self.buckets
            .entry(descriptor.identity.clone())
            .or_default()
            .push(index);
        self.all.push(TrackedBlock {
            descriptor,
            node,
            index,
        });
    }

    /// Number of tracked blocks sharing the identity.
    pub fn occurrence_count(&self, identity: &Identity) -> usize {
        self.buckets.get(identity).map_or(0, Vec::len)
    }

    /// Tracked blocks of one identity, in traversal order.
    pub fn bucket(&self, identity: &Identity) -> Vec<TrackedBlock<'a>> {
        self.buckets
            .get(identity)
            .map(|indices| indices.iter().map(|&i| self.all[i]).collect())
            .unwrap_or_default()
    }

    /// All tracked blocks in traversal order (defensive copy).
    pub fn ordered_blocks(&self) -> Vec<TrackedBlock<'a>> {
        self.all.clone()
    }

    /// Position of the first tracked occurrence of the identity.
    pub fn first_position(&self, identity: &Identity) -> Option<usize> {
        self.buckets
            .get(identity)
            .and_then(|indices| indices.first().copied())
    }
}
