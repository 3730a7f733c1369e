//! Checker Dispatch Registry
//!
//! Fixed mapping from block kind to its leaf checker. Construction fails
//! fast on duplicate registrations or incomplete coverage of the closed kind
//! set; these are configuration defects, not document defects.

use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::diagnostics::Diagnostic;
use crate::document::Node;
use crate::rules::RuleDescriptor;

use super::checkers::default_checkers;
use super::classify::BlockKind;
use super::context::ValidationContext;

/// Field-level checker for one block kind.
///
/// Invoked once per tracked block; must not mutate the tracking context.
pub trait BlockChecker {
    /// The kind this checker claims. Must be a concrete kind.
    fn kind(&self) -> BlockKind;

    /// Run the field-level checks for one block.
    fn check(
        &self,
        node: &Node,
        rule: &RuleDescriptor,
        ctx: &ValidationContext,
    ) -> Vec<Diagnostic>;
}

/// Registry mapping each block kind to exactly one checker.
pub struct CheckerRegistry {
    checkers: HashMap<BlockKind, Box<dyn BlockChecker>>,
}

impl CheckerRegistry {
    /// Build a registry from an explicit checker list.
    ///
    /// Hard error if two checkers claim the same kind, a checker claims
    /// `Unknown`, or any concrete kind is left uncovered.
    pub fn with_checkers(list: Vec<Box<dyn BlockChecker>>) -> Result<Self> {
        let mut checkers: HashMap<BlockKind, Box<dyn BlockChecker>> = HashMap::new();
        for checker in list {
            let kind = checker.kind();
            if kind == BlockKind::Unknown {
                bail!("checker registered without a concrete block kind");
            }
            if checkers.insert(kind, checker).is_some() {
                bail!("duplicate checker registered for block kind '{kind}'");
            }
        }
        for kind in BlockKind::ALL {
            if !checkers.contains_key(&kind) {
                bail!("no checker registered for block kind '{kind}'");
            }
        }
        Ok(Self { checkers })
    }

    /// Build the registry with the built-in checker per kind.
    pub fn with_default_checkers() -> Result<Self> {
        Self::with_checkers(default_checkers())
    }

    pub fn get(&self, kind: BlockKind) -> Option<&dyn BlockChecker> {
        self.checkers.get(&kind).map(Box::as_ref)
    }
}

impl std::fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("kinds", &self.checkers.keys().collect::<Vec<_>>())
            .finish()
    }
}
