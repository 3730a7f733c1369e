//! End-Line Resolver
//!
//! Recovers the last source line of a block when the parsed tree only
//! retains a starting line. Termination rules are per kind: delimited blocks
//! scan for a matching closing delimiter, lists follow marker/continuation
//! heuristics, paragraphs end at a blank line, media macros are single
//! lines. The resolver never fails; with unmatched delimiters it returns the
//! best line it reached.

use crate::document::{Node, SourceLines};

use super::classify::BlockKind;

/// Fixed per-kind delimiter tokens for delimited blocks.
///
/// A delimited admonition reuses the example delimiter; verse reuses the
/// quote delimiter.
pub fn delimiter_token(kind: BlockKind) -> Option<&'static str> {
    match kind {
        BlockKind::Listing => Some("----"),
        BlockKind::Literal => Some("...."),
        BlockKind::Example | BlockKind::Admonition => Some("===="),
        BlockKind::Sidebar => Some("****"),
        BlockKind::Quote | BlockKind::Verse => Some("____"),
        BlockKind::Passthrough => Some("++++"),
        BlockKind::Open => Some("--"),
        BlockKind::Comment => Some("////"),
        BlockKind::Table => Some("|==="),
        _ => None,
    }
}

/// Every delimiter token, for the new-block-start recognizer.
const DELIMITER_TOKENS: [&str; 9] = [
    "----", "....", "====", "****", "____", "++++", "--", "////", "|===",
];

/// Textual prefixes that always start a new block.
const BLOCK_START_PREFIXES: [&str; 4] = ["image::", "video::", "audio::", "include::"];

/// Whether a raw line is recognized as starting a new block.
///
/// Shared by every termination rule so that all kinds agree on where a
/// following block begins: section markers, media macros, include
/// directives, attribute-line openers, and each delimiter token.
pub fn starts_new_block(line: &str) -> bool {
    let trimmed = line.trim_end();
    if DELIMITER_TOKENS.contains(&trimmed) {
        return true;
    }
    if is_section_marker(trimmed) {
        return true;
    }
    if BLOCK_START_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
    {
        return true;
    }
    // Attribute line such as [source,rust] or [NOTE]
    trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() >= 2
}

fn is_section_marker(line: &str) -> bool {
    let eq_count = line.chars().take_while(|c| *c == '=').count();
    eq_count >= 1 && line[eq_count..].starts_with(' ')
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Leading-whitespace width of a line, in characters.
fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Resolve the last line belonging to `node`, 1-based.
///
/// `kind` selects the termination rule; `lines` is the read-only raw source.
/// The result is best effort: an unclosed delimited block resolves to the
/// end of the file, and callers must treat the value as advisory for
/// diagnostic placement, not as proof the block is well formed.
pub fn resolve_end_line(node: &Node, kind: BlockKind, lines: &SourceLines) -> u32 {
    let start = node.start_line().unwrap_or(1);

    match kind {
        BlockKind::Image | BlockKind::Video | BlockKind::Audio => start,
        BlockKind::Dlist => description_list_end(start, lines),
        BlockKind::Ulist => list_end(start, lines, is_ulist_marker),
        BlockKind::Olist => list_end(start, lines, is_olist_marker),
        BlockKind::Colist => list_end(start, lines, is_colist_marker),
        BlockKind::Paragraph => paragraph_end(start, lines),
        BlockKind::Unknown => fallback_end(start, lines),
        delimited => match delimiter_token(delimited) {
            Some(token) => delimited_end(start, token, lines),
            None => fallback_end(start, lines),
        },
    }
}

/// Two-phase delimiter scan: find the opening token at or after the start
/// line, then the next line exactly equal to the same token.
fn delimited_end(start: u32, token: &str, lines: &SourceLines) -> u32 {
    // Phase 1: locate the opening delimiter. Metadata lines (title,
    // attribute list) may sit between the recorded start and the opener; a
    // blank line before any opener means the block was not delimited in the
    // source (e.g. a single-line admonition paragraph).
    let mut i = start;
    let open = loop {
        match lines.get(i) {
            None => return paragraph_end(start, lines),
            Some(line) if line.trim_end() == token => break i,
            Some(line) if is_blank(line) => return paragraph_end(start, lines),
            Some(_) => i += 1,
        }
    };

    // Phase 2: scan for the matching closer.
    let mut j = open + 1;
    while let Some(line) = lines.get(j) {
        if line.trim_end() == token {
            return j;
        }
        j += 1;
    }

    // Unclosed: best effort, end of file.
    lines.last_line()
}

/// A paragraph continues until a blank line or the start of another block.
fn paragraph_end(start: u32, lines: &SourceLines) -> u32 {
    let mut last = start;
    let mut i = start;
    while let Some(line) = lines.get(i) {
        if is_blank(line) {
            break;
        }
        if i != start && starts_new_block(line) {
            break;
        }
        last = i;
        i += 1;
    }
    last
}

fn is_ulist_marker(line: &str) -> bool {
    let trimmed = line.trim_start();
    let marker_len = trimmed
        .chars()
        .take_while(|c| *c == '*' || *c == '-')
        .count();
    marker_len >= 1 && trimmed[marker_len..].starts_with(' ')
}

fn is_olist_marker(line: &str) -> bool {
    let trimmed = line.trim_start();
    let dot_len = trimmed.chars().take_while(|c| *c == '.').count();
    if dot_len >= 1 && trimmed[dot_len..].starts_with(' ') {
        return true;
    }
    // Numbered form: "3. item"
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    digits >= 1 && trimmed[digits..].starts_with(". ")
}

fn is_colist_marker(line: &str) -> bool {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('<') {
        return false;
    }
    let inner = &trimmed[1..];
    let digits = inner.chars().take_while(char::is_ascii_digit).count();
    digits >= 1 && inner[digits..].starts_with("> ")
}

/// A continuation line attaches to the current list item: leading
/// whitespace, or the explicit `+` continuation marker.
fn is_list_continuation(line: &str) -> bool {
    line.trim_end() == "+" || (!is_blank(line) && line.starts_with(|c: char| c.is_whitespace()))
}

/// Lists continue over marker lines and continuation lines; the first blank
/// or non-matching line ends the list. A `+` marker attaches the line that
/// follows it.
fn list_end(start: u32, lines: &SourceLines, is_marker: fn(&str) -> bool) -> u32 {
    let mut last = start;
    let mut i = start;
    let mut attached = false;
    while let Some(line) = lines.get(i) {
        if is_blank(line) {
            break;
        }
        if line.trim_end() == "+" {
            attached = true;
            last = i;
            i += 1;
            continue;
        }
        if is_marker(line) || is_list_continuation(line) || attached {
            attached = false;
            last = i;
            i += 1;
            continue;
        }
        break;
    }
    last
}

fn is_term_line(line: &str) -> bool {
    if is_blank(line) || starts_new_block(line) {
        return false;
    }
    let trimmed = line.trim_end();
    match trimmed.find("::") {
        // "term::" or "term:: description"; a leading "::" is not a term
        Some(pos) if pos > 0 => {
            let after = &trimmed[pos + 2..];
            after.is_empty() || after.starts_with(' ')
        }
        _ => false,
    }
}

/// Description lists alternate term lines (containing the `::` separator)
/// and description continuation lines. The list ends at a blank line not
/// immediately followed by another term line, or at a line that starts a new
/// block; returns the last content line actually consumed.
fn description_list_end(start: u32, lines: &SourceLines) -> u32 {
    let mut last = start;
    let mut i = start;
    while let Some(line) = lines.get(i) {
        if is_blank(line) {
            let next_is_term = lines.get(i + 1).is_some_and(is_term_line);
            if !next_is_term {
                break;
            }
            i += 1;
            continue;
        }
        if i != start && starts_new_block(line) {
            break;
        }
        last = i;
        i += 1;
    }
    last
}

/// Generic fallback: continue while indentation does not decrease below the
/// start line's indentation and no new-block-start pattern is seen.
fn fallback_end(start: u32, lines: &SourceLines) -> u32 {
    let start_indent = lines.get(start).map(indentation).unwrap_or(0);
    let mut last = start;
    let mut i = start;
    while let Some(line) = lines.get(i) {
        if is_blank(line) {
            break;
        }
        if i != start && (starts_new_block(line) || indentation(line) < start_indent) {
            break;
        }
        last = i;
        i += 1;
    }
    last
}
