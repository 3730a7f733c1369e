//! Occurrence Validator
//!
//! Compares tracked counts against configured minimum/maximum per block
//! identity. Exactly one diagnostic per violated bound per descriptor; a
//! required-but-missing block gets a synthesized insertion point inside the
//! container.

use crate::diagnostics::{resolve_severity, Diagnostic, Location};
use crate::rules::RuleSet;

use super::adapter::{list_children, Container};
use super::classify::{classify, BlockKind};
use super::context::ValidationContext;
use super::endline::resolve_end_line;

/// Kind-specific placeholder snippet suggested when a required block is
/// missing entirely.
fn placeholder(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Paragraph => "Add a paragraph.",
        BlockKind::Listing => "[source]\n----\n...\n----",
        BlockKind::Literal => "....\n...\n....",
        BlockKind::Example => "====\n...\n====",
        BlockKind::Sidebar => "****\n...\n****",
        BlockKind::Quote => "[quote]\n____\n...\n____",
        BlockKind::Verse => "[verse]\n____\n...\n____",
        BlockKind::Passthrough => "++++\n...\n++++",
        BlockKind::Open => "--\n...\n--",
        BlockKind::Comment => "////\n...\n////",
        BlockKind::Table => "|===\n| ...\n|===",
        BlockKind::Image => "image::path/to/image.png[]",
        BlockKind::Video => "video::path/to/video.mp4[]",
        BlockKind::Audio => "audio::path/to/audio.mp3[]",
        BlockKind::Admonition => "NOTE: ...",
        BlockKind::Ulist => "* item",
        BlockKind::Olist => ". item",
        BlockKind::Dlist => "term:: description",
        BlockKind::Colist => "<1> explanation",
        BlockKind::Unknown => "...",
    }
}

/// Line at which a missing block would be inserted: the end of the
/// container's last direct non-subsection child if any exist, else the line
/// just after the container's title.
fn insertion_line(container: &Container, ctx: &ValidationContext) -> u32 {
    let children = list_children(container);
    match children.last() {
        Some(last) => resolve_end_line(last, classify(last), ctx.lines()),
        None => container.start_line() + 1,
    }
}

/// Check every configured descriptor's occurrence bounds against the
/// tracked counts.
pub fn validate(ctx: &ValidationContext, rules: &RuleSet, container: &Container) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for descriptor in rules.configured() {
        let Some(occurrence) = descriptor.occurrence else {
            continue;
        };
        let n = ctx.occurrence_count(&descriptor.identity);
        let severity = resolve_severity(occurrence.severity, descriptor.severity);
        let identity = &descriptor.identity;

        if (n as u32) < occurrence.min {
            let line = insertion_line(container, ctx);
            log::debug!(
                "{}: '{identity}' occurs {n} times, minimum is {}",
                container.label(),
                occurrence.min
            );
            diagnostics.push(
                Diagnostic::new(
                    severity,
                    "occurrence.min",
                    Location::line(ctx.file(), line),
                    format!(
                        "too few occurrences of '{identity}' in {}",
                        container.label()
                    ),
                )
                .with_actual(n.to_string())
                .with_expected(format!("at least {}", occurrence.min))
                .with_hint(format!("insert for example:\n{}", placeholder(identity.kind))),
            );
        }

        if let Some(max) = occurrence.max {
            if (n as u32) > max {
                diagnostics.push(
                    Diagnostic::new(
                        severity,
                        "occurrence.max",
                        Location::line(ctx.file(), container.start_line()),
                        format!(
                            "too many occurrences of '{identity}' in {}",
                            container.label()
                        ),
                    )
                    .with_actual(n.to_string())
                    .with_expected(format!("at most {max}")),
                );
            }
        }
    }

    diagnostics
}
