//! Order Validator
//!
//! Checks three constraint families against the actually observed sequence:
//! a total fixed order, pairwise "A before B", and pairwise "A after B".
//! Each constraint is checked independently.

use crate::diagnostics::{resolve_severity, Diagnostic, Location};
use crate::rules::{Identity, OrderConfig};

use super::context::{TrackedBlock, ValidationContext};

fn block_location(ctx: &ValidationContext, block: &TrackedBlock) -> Location {
    let line = block.node.start_line().unwrap_or(1);
    Location::line(ctx.file(), line)
}

/// Walk the observed sequence against the configured order list with an
/// expected-index cursor. A block whose configured position has already been
/// passed is out of order; identities absent from the list are ignored.
fn validate_fixed(ctx: &ValidationContext, order: &OrderConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut expected_index = 0usize;

    for block in ctx.ordered_blocks() {
        let identity = &block.descriptor.identity;
        let Some(position) = order.fixed.iter().position(|id| id == identity) else {
            continue;
        };
        if position < expected_index {
            diagnostics.push(
                Diagnostic::new(
                    order.severity,
                    "order.fixed",
                    block_location(ctx, &block),
                    format!(
                        "block '{identity}' appears after '{}', violating the configured order",
                        order.fixed[expected_index - 1]
                    ),
                )
                .with_expected(format!(
                    "'{identity}' before '{}'",
                    order.fixed[expected_index - 1]
                )),
            );
        } else {
            expected_index = position + 1;
        }
    }

    diagnostics
}

/// First tracked positions of a constrained pair, if both identities occur.
fn pair_positions(
    ctx: &ValidationContext,
    first: &Identity,
    second: &Identity,
) -> Option<(usize, usize)> {
    Some((ctx.first_position(first)?, ctx.first_position(second)?))
}

/// Check all configured order constraints against the tracked sequence.
pub fn validate(ctx: &ValidationContext, order: &OrderConfig) -> Vec<Diagnostic> {
    let mut diagnostics = validate_fixed(ctx, order);
    let ordered = ctx.ordered_blocks();

    for pair in &order.before {
        // A pair with either side absent is unconstrained.
        let Some((first_pos, second_pos)) = pair_positions(ctx, &pair.first, &pair.second) else {
            continue;
        };
        if first_pos > second_pos {
            let severity = resolve_severity(pair.severity, order.severity);
            diagnostics.push(
                Diagnostic::new(
                    severity,
                    "order.before",
                    block_location(ctx, &ordered[first_pos]),
                    format!("block '{}' must not come after '{}'", pair.first, pair.second),
                )
                .with_expected(format!("'{}' before '{}'", pair.first, pair.second)),
            );
        }
    }

    for pair in &order.after {
        let Some((first_pos, second_pos)) = pair_positions(ctx, &pair.first, &pair.second) else {
            continue;
        };
        if first_pos < second_pos {
            let severity = resolve_severity(pair.severity, order.severity);
            diagnostics.push(
                Diagnostic::new(
                    severity,
                    "order.after",
                    block_location(ctx, &ordered[first_pos]),
                    format!("block '{}' must not come before '{}'", pair.first, pair.second),
                )
                .with_expected(format!("'{}' after '{}'", pair.first, pair.second)),
            );
        }
    }

    diagnostics
}
