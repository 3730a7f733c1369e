use adoc_structure_lint::document::{parse_tree, SourceLines};
use adoc_structure_lint::rules::{RuleFile, RuleSet};
use adoc_structure_lint::validation::validate_document;
use adoc_structure_lint::Severity;

fn rules_from(toml_text: &str) -> RuleSet {
    let file: RuleFile = toml::from_str(toml_text).expect("rule TOML");
    RuleSet::from_file(file).expect("rule set")
}

#[test]
fn test_two_admonitions_against_max_one() {
    let rules = rules_from(
        r#"
        [ruleset]
        name = "t"

        [[blocks]]
        kind = "admonition"
        severity = "error"
        occurrence = { min = 1, max = 1 }
        "#,
    );
    let doc = parse_tree(
        r#"{
            "title": "Doc",
            "blocks": [
                {"context": "admonition", "style": "NOTE", "location": {"start_line": 3}},
                {"context": "admonition", "style": "TIP", "location": {"start_line": 5}}
            ]
        }"#,
    )
    .unwrap();
    let lines = SourceLines::from_text("= Doc\n\nNOTE: first\n\nTIP: second\n");

    let diags = validate_document(&doc, &rules, "doc.adoc", &lines).unwrap();

    // Exactly one "too many" diagnostic, none for the first block.
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule_id, "occurrence.max");
    assert_eq!(diags[0].actual.as_deref(), Some("2"));
    assert_eq!(diags[0].expected.as_deref(), Some("at most 1"));
}

#[test]
fn test_section_with_no_paragraph_gets_synthesized_insertion() {
    let rules = rules_from(
        r#"
        [ruleset]
        name = "t"

        [[blocks]]
        kind = "paragraph"
        occurrence = { min = 1, max = 3 }
        "#,
    );
    // The section holds a single listing ending at line 8; the missing
    // paragraph is anchored there.
    let doc = parse_tree(
        r#"{
            "title": "Doc",
            "blocks": [
                {"context": "paragraph", "location": {"start_line": 3}},
                {
                    "context": "section",
                    "title": "Setup",
                    "location": {"start_line": 5},
                    "blocks": [
                        {"context": "listing", "location": {"start_line": 6}}
                    ]
                }
            ]
        }"#,
    )
    .unwrap();
    let lines = SourceLines::from_text("= Doc\n\nintro\n\n== Setup\n----\ncode\n----\n");

    let diags = validate_document(&doc, &rules, "doc.adoc", &lines).unwrap();

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule_id, "occurrence.min");
    assert!(diags[0].message.contains("section 'Setup'"));
    assert_eq!(diags[0].location.start_line, 8);
    assert!(diags[0].hint.is_some());
}

#[test]
fn test_fixed_order_table_before_image() {
    let rules = rules_from(
        r#"
        [ruleset]
        name = "t"

        [order]
        severity = "warning"
        fixed = ["image", "table"]
        "#,
    );
    // Observed sequence [table, image, paragraph]
    let doc = parse_tree(
        r#"{
            "blocks": [
                {"context": "table", "location": {"start_line": 1}},
                {"context": "image", "attributes": {"target": "x.png"}, "location": {"start_line": 5}},
                {"context": "paragraph", "location": {"start_line": 7}}
            ]
        }"#,
    )
    .unwrap();
    let lines = SourceLines::from_text("|===\n| a\n|===\n\nimage::x.png[]\n\ntext\n");

    let diags = validate_document(&doc, &rules, "doc.adoc", &lines).unwrap();

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule_id, "order.fixed");
    assert_eq!(diags[0].severity, Severity::Warning);
    // The diagnostic names both sides of the inversion.
    assert!(diags[0].message.contains("'image'"));
    assert!(diags[0].message.contains("'table'"));
}

#[test]
fn test_clean_document_produces_no_diagnostics() {
    let rules = rules_from(
        r#"
        [ruleset]
        name = "t"

        [[blocks]]
        kind = "paragraph"
        occurrence = { min = 1 }

        [[blocks]]
        kind = "listing"
        required_attributes = ["language"]

        [order]
        fixed = ["paragraph", "listing"]
        "#,
    );
    let doc = parse_tree(
        r#"{
            "title": "Doc",
            "blocks": [
                {"context": "paragraph", "location": {"start_line": 3}},
                {
                    "context": "listing",
                    "attributes": {"language": "rust"},
                    "location": {"start_line": 5}
                }
            ]
        }"#,
    )
    .unwrap();
    let lines = SourceLines::from_text("= Doc\n\nintro\n\n----\nfn main() {}\n----\n");

    let diags = validate_document(&doc, &rules, "doc.adoc", &lines).unwrap();
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
}

#[test]
fn test_preamble_children_are_validated_as_document_blocks() {
    let rules = rules_from(
        r#"
        [ruleset]
        name = "t"

        [[blocks]]
        kind = "paragraph"
        occurrence = { min = 1 }
        "#,
    );
    let doc = parse_tree(
        r#"{
            "title": "Doc",
            "blocks": [
                {
                    "context": "preamble",
                    "blocks": [
                        {"context": "paragraph", "location": {"start_line": 3}}
                    ]
                },
                {"context": "section", "title": "S", "location": {"start_line": 5},
                 "blocks": [{"context": "paragraph", "location": {"start_line": 7}}]}
            ]
        }"#,
    )
    .unwrap();
    let lines = SourceLines::from_text("= Doc\n\nintro\n\n== S\n\nbody\n");

    let diags = validate_document(&doc, &rules, "doc.adoc", &lines).unwrap();
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
}

#[test]
fn test_named_rule_tracks_separately_from_unnamed() {
    let rules = rules_from(
        r#"
        [ruleset]
        name = "t"

        [[blocks]]
        kind = "listing"
        name = "setup"
        severity = "error"
        occurrence = { min = 1 }

        [[blocks]]
        kind = "listing"
        "#,
    );
    // One anonymous listing only; the named 'setup' listing is missing.
    let doc = parse_tree(
        r#"{
            "blocks": [
                {"context": "listing", "location": {"start_line": 1}}
            ]
        }"#,
    )
    .unwrap();
    let lines = SourceLines::from_text("----\ncode\n----\n");

    let diags = validate_document(&doc, &rules, "doc.adoc", &lines).unwrap();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule_id, "occurrence.min");
    assert!(diags[0].message.contains("listing:setup"));
    assert_eq!(diags[0].severity, Severity::Error);
}

#[test]
fn test_field_checks_run_alongside_structure_checks() {
    let rules = rules_from(
        r#"
        [ruleset]
        name = "t"

        [[blocks]]
        kind = "table"
        severity = "error"
        title_required = true
        occurrence = { max = 1 }
        "#,
    );
    // Two untitled tables: two title diagnostics plus one excess diagnostic.
    let doc = parse_tree(
        r#"{
            "blocks": [
                {"context": "table", "location": {"start_line": 1}},
                {"context": "table", "location": {"start_line": 5}}
            ]
        }"#,
    )
    .unwrap();
    let lines = SourceLines::from_text("|===\n| a\n|===\n\n|===\n| b\n|===\n");

    let diags = validate_document(&doc, &rules, "doc.adoc", &lines).unwrap();
    assert_eq!(diags.len(), 3);
    assert_eq!(
        diags
            .iter()
            .filter(|d| d.rule_id == "block.title-required")
            .count(),
        2
    );
    assert_eq!(
        diags
            .iter()
            .filter(|d| d.rule_id == "occurrence.max")
            .count(),
        1
    );
}
