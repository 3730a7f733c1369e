//! Validation Engine
//!
//! Control flow for one document: for each container the adapter yields
//! child blocks in document order, the classifier tags each, the tracking
//! context records it, and the dispatch registry routes it to its leaf
//! checker; after all children are visited the occurrence and order
//! validators run once for that container. Sections are validated
//! recursively, each with a fresh context.

use anyhow::Result;

use crate::diagnostics::{Diagnostic, ValidationResult};
use crate::document::{Document, SourceLines};
use crate::rules::RuleSet;

use super::adapter::{list_children, Container};
use super::classify::{classify, BlockKind};
use super::context::ValidationContext;
use super::registry::CheckerRegistry;
use super::{occurrence, order};

/// Validate a whole document against a rule set.
///
/// Builds the default checker registry; a registry construction failure is a
/// configuration defect and surfaces as a hard error, never a diagnostic.
pub fn validate_document(
    document: &Document,
    rules: &RuleSet,
    file: &str,
    lines: &SourceLines,
) -> Result<Vec<Diagnostic>> {
    let registry = CheckerRegistry::with_default_checkers()?;
    Ok(validate_with(
        &Container::Document(document),
        rules,
        &registry,
        file,
        lines,
    ))
}

/// Validate one container (and its subsections) against a rule set.
pub fn validate_container(
    container: &Container,
    rules: &RuleSet,
    file: &str,
    lines: &SourceLines,
) -> Result<Vec<Diagnostic>> {
    let registry = CheckerRegistry::with_default_checkers()?;
    Ok(validate_with(container, rules, &registry, file, lines))
}

fn validate_with(
    container: &Container,
    rules: &RuleSet,
    registry: &CheckerRegistry,
    file: &str,
    lines: &SourceLines,
) -> Vec<Diagnostic> {
    let mut result = ValidationResult::new();
    let mut ctx = ValidationContext::new(file, lines);

    log::debug!("validating {}", container.label());

    for node in list_children(container) {
        let kind = classify(node);
        if kind == BlockKind::Unknown {
            // Intentional under-coverage: no checker, no diagnostic.
            log::debug!(
                "skipping unclassified block (context '{}') at line {}",
                node.context,
                node.start_line().unwrap_or(1)
            );
            continue;
        }
        let rule = rules.rule_for(kind, node);
        ctx.track(rule, node);
        if let Some(checker) = registry.get(kind) {
            result.extend(checker.check(node, rule, &ctx));
        }
    }

    result.extend(occurrence::validate(&ctx, rules, container));
    if let Some(order_config) = rules.order() {
        result.extend(order::validate(&ctx, order_config));
    }

    // Depth-first recursion; each subsection owns its own context.
    for section in container.sections() {
        result.extend(validate_with(
            &Container::Section(section),
            rules,
            registry,
            file,
            lines,
        ));
    }

    result.diagnostics
}
