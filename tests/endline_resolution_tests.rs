//! End-line resolution through the public API, the way a report formatter
//! would use it.

use adoc_structure_lint::document::{parse_tree, SourceLines};
use adoc_structure_lint::validation::{classify, resolve_end_line};
use adoc_structure_lint::BlockKind;

fn block_at(context: &str, line: u32) -> adoc_structure_lint::document::Node {
    let json = format!(
        r#"{{"blocks": [{{"context": "{context}", "location": {{"start_line": {line}}}}}]}}"#
    );
    parse_tree(&json).unwrap().blocks.remove(0)
}

#[test]
fn test_listing_block_closing_delimiter() {
    // Delimiter pair at lines 5 and 9.
    let lines = SourceLines::from_text("= Doc\n\nintro\n\n----\nlet x = 1;\nlet y = 2;\nx + y\n----\n\nafter\n");
    let node = block_at("listing", 5);
    let kind = classify(&node);
    assert_eq!(kind, BlockKind::Listing);
    assert_eq!(resolve_end_line(&node, kind, &lines), 9);
}

#[test]
fn test_unordered_list_run() {
    // Markers at 3..=5, continuation at 6, blank at 7.
    let lines = SourceLines::from_text("intro\n\n* alpha\n* beta\n* gamma\n  gamma wrapped\n\nafter\n");
    let node = block_at("ulist", 3);
    assert_eq!(resolve_end_line(&node, BlockKind::Ulist, &lines), 6);
}

#[test]
fn test_paragraph_stops_at_attribute_line() {
    let lines = SourceLines::from_text("first line\nsecond line\n[NOTE]\n====\nnote\n====\n");
    let node = block_at("paragraph", 1);
    assert_eq!(resolve_end_line(&node, BlockKind::Paragraph, &lines), 2);
}

#[test]
fn test_unclosed_block_is_best_effort() {
    let lines = SourceLines::from_text("....\nliteral text\nstill going\n");
    let node = block_at("literal", 1);
    assert_eq!(resolve_end_line(&node, BlockKind::Literal, &lines), 3);
}

#[test]
fn test_resolution_is_stable_across_calls() {
    let lines = SourceLines::from_text("|===\n| a | b\n|===\n\ntext\n");
    let node = block_at("table", 1);
    let kind = classify(&node);
    let results: Vec<u32> = (0..3).map(|_| resolve_end_line(&node, kind, &lines)).collect();
    assert_eq!(results, vec![3, 3, 3]);
}
