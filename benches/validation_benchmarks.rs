use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use adoc_structure_lint::document::{parse_tree, Document, SourceLines};
use adoc_structure_lint::rules::{RuleFile, RuleSet};
use adoc_structure_lint::validation::validate_document;

/// Generate a parsed tree and matching source with `sections` sections of
/// mixed block kinds.
fn generate_document(sections: usize) -> (Document, String) {
    let mut source = String::from("= Benchmark Document\n\nintro paragraph\n");
    let mut blocks = vec![String::from(
        r#"{"context": "paragraph", "location": {"start_line": 3}}"#,
    )];
    let mut line = 5;

    for s in 0..sections {
        let mut children = Vec::new();
        source.push_str(&format!("\n== Section {s}\n\nbody text\n\n----\ncode\n----\n"));
        let section_line = line;
        children.push(format!(
            r#"{{"context": "paragraph", "location": {{"start_line": {}}}}}"#,
            section_line + 2
        ));
        children.push(format!(
            r#"{{"context": "listing", "attributes": {{"language": "rust"}}, "location": {{"start_line": {}}}}}"#,
            section_line + 4
        ));
        blocks.push(format!(
            r#"{{"context": "section", "title": "Section {s}", "location": {{"start_line": {section_line}}}, "blocks": [{}]}}"#,
            children.join(",")
        ));
        line += 8;
    }

    let json = format!(r#"{{"title": "Benchmark Document", "blocks": [{}]}}"#, blocks.join(","));
    (parse_tree(&json).unwrap(), source)
}

fn bench_rules() -> RuleSet {
    let file: RuleFile = toml::from_str(
        r#"
        [ruleset]
        name = "bench"

        [[blocks]]
        kind = "paragraph"
        occurrence = { min = 1 }

        [[blocks]]
        kind = "listing"
        required_attributes = ["language"]

        [order]
        fixed = ["paragraph", "listing"]
        "#,
    )
    .unwrap();
    RuleSet::from_file(file).unwrap()
}

fn bench_validate_document(c: &mut Criterion) {
    let rules = bench_rules();
    let mut group = c.benchmark_group("validate_document");

    for sections in [1, 10, 100] {
        let (document, source) = generate_document(sections);
        let lines = SourceLines::from_text(&source);
        group.throughput(Throughput::Elements(sections as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(sections),
            &(document, lines),
            |b, (document, lines)| {
                b.iter(|| {
                    validate_document(
                        black_box(document),
                        black_box(&rules),
                        "bench.adoc",
                        black_box(lines),
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_validate_document);
criterion_main!(benches);
