//! Built-in Leaf Checkers
//!
//! One checker per block kind, all rule-driven: the common field checks
//! (title, attributes, length bounds) come straight from the rule
//! descriptor, with small kind-specific additions for media targets and
//! listing languages.

use crate::diagnostics::{Diagnostic, Location};
use crate::document::Node;
use crate::rules::RuleDescriptor;

use super::classify::BlockKind;
use super::context::ValidationContext;
use super::endline::resolve_end_line;
use super::registry::BlockChecker;

fn block_location(node: &Node, kind: BlockKind, ctx: &ValidationContext) -> Location {
    let start = node.start_line().unwrap_or(1);
    let end = resolve_end_line(node, kind, ctx.lines());
    Location::lines(ctx.file(), start, end)
}

/// The rule-driven checks shared by every kind.
fn check_common(
    node: &Node,
    rule: &RuleDescriptor,
    ctx: &ValidationContext,
    kind: BlockKind,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let checks = &rule.checks;
    let identity = &rule.identity;

    if checks.title_required && node.title.as_deref().is_none_or(str::is_empty) {
        diagnostics.push(Diagnostic::new(
            rule.severity,
            "block.title-required",
            block_location(node, kind, ctx),
            format!("block '{identity}' is missing a title"),
        ));
    }

    if let (Some(pattern), Some(title)) = (&checks.title_pattern, node.title.as_deref()) {
        if !pattern.is_match(title) {
            diagnostics.push(
                Diagnostic::new(
                    rule.severity,
                    "block.title-pattern",
                    block_location(node, kind, ctx),
                    format!("title of block '{identity}' does not match the configured pattern"),
                )
                .with_actual(title.to_string())
                .with_expected(pattern.as_str().to_string()),
            );
        }
    }

    for attr in &checks.required_attributes {
        if !node.has_attr(attr) {
            diagnostics.push(Diagnostic::new(
                rule.severity,
                "block.attribute-required",
                block_location(node, kind, ctx),
                format!("block '{identity}' is missing required attribute '{attr}'"),
            ));
        }
    }

    if checks.min_lines.is_some() || checks.max_lines.is_some() {
        let start = node.start_line().unwrap_or(1);
        let end = resolve_end_line(node, kind, ctx.lines());
        let span = end.saturating_sub(start) + 1;
        if let Some(min) = checks.min_lines {
            if span < min {
                diagnostics.push(
                    Diagnostic::new(
                        rule.severity,
                        "block.length",
                        Location::lines(ctx.file(), start, end),
                        format!("block '{identity}' is shorter than {min} lines"),
                    )
                    .with_actual(span.to_string())
                    .with_expected(format!("at least {min} lines")),
                );
            }
        }
        if let Some(max) = checks.max_lines {
            if span > max {
                diagnostics.push(
                    Diagnostic::new(
                        rule.severity,
                        "block.length",
                        Location::lines(ctx.file(), start, end),
                        format!("block '{identity}' is longer than {max} lines"),
                    )
                    .with_actual(span.to_string())
                    .with_expected(format!("at most {max} lines")),
                );
            }
        }
    }

    diagnostics
}

/// Checker for kinds with only the common rule-driven checks.
pub struct FieldChecker {
    kind: BlockKind,
}

impl FieldChecker {
    pub fn new(kind: BlockKind) -> Self {
        Self { kind }
    }
}

impl BlockChecker for FieldChecker {
    fn kind(&self) -> BlockKind {
        self.kind
    }

    fn check(
        &self,
        node: &Node,
        rule: &RuleDescriptor,
        ctx: &ValidationContext,
    ) -> Vec<Diagnostic> {
        check_common(node, rule, ctx, self.kind)
    }
}

/// Checker for media blocks (image/video/audio): the macro must carry a
/// target.
pub struct MediaChecker {
    kind: BlockKind,
}

impl MediaChecker {
    pub fn new(kind: BlockKind) -> Self {
        Self { kind }
    }
}

impl BlockChecker for MediaChecker {
    fn kind(&self) -> BlockKind {
        self.kind
    }

    fn check(
        &self,
        node: &Node,
        rule: &RuleDescriptor,
        ctx: &ValidationContext,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = check_common(node, rule, ctx, self.kind);
        if node.attr("target").is_none_or(str::is_empty) {
            diagnostics.push(Diagnostic::new(
                rule.severity,
                "block.media-target",
                block_location(node, self.kind, ctx),
                format!("{} block has no target", self.kind),
            ));
        }
        diagnostics
    }
}

/// Checker for listing blocks: the declared language must be in the
/// configured allow-list, when one is configured.
pub struct ListingChecker;

impl BlockChecker for ListingChecker {
    fn kind(&self) -> BlockKind {
        BlockKind::Listing
    }

    fn check(
        &self,
        node: &Node,
        rule: &RuleDescriptor,
        ctx: &ValidationContext,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = check_common(node, rule, ctx, BlockKind::Listing);
        if let Some(language) = node.attr("language") {
            if !rule.checks.languages.is_empty()
                && !rule.checks.languages.iter().any(|l| l == language)
            {
                diagnostics.push(
                    Diagnostic::new(
                        rule.severity,
                        "block.listing-language",
                        block_location(node, BlockKind::Listing, ctx),
                        format!("listing language '{language}' is not in the allowed set"),
                    )
                    .with_actual(language.to_string())
                    .with_expected(rule.checks.languages.join(", ")),
                );
            }
        }
        diagnostics
    }
}

/// The built-in checker list covering every concrete kind exactly once.
pub fn default_checkers() -> Vec<Box<dyn BlockChecker>> {
    let mut list: Vec<Box<dyn BlockChecker>> = vec![
        Box::new(ListingChecker),
        Box::new(MediaChecker::new(BlockKind::Image)),
        Box::new(MediaChecker::new(BlockKind::Video)),
        Box::new(MediaChecker::new(BlockKind::Audio)),
    ];
    for kind in [
        BlockKind::Paragraph,
        BlockKind::Literal,
        BlockKind::Example,
        BlockKind::Sidebar,
        BlockKind::Quote,
        BlockKind::Verse,
        BlockKind::Passthrough,
        BlockKind::Open,
        BlockKind::Comment,
        BlockKind::Table,
        BlockKind::Admonition,
        BlockKind::Ulist,
        BlockKind::Olist,
        BlockKind::Dlist,
        BlockKind::Colist,
    ] {
        list.push(Box::new(FieldChecker::new(kind)));
    }
    list
}
