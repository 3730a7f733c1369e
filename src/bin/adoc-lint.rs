use anyhow::{Context, Result};

use adoc_structure_lint::config::{Config, ReportFormat};
use adoc_structure_lint::document::{load_tree, SourceLines};
use adoc_structure_lint::report;
use adoc_structure_lint::rules;
use adoc_structure_lint::validation::validate_document;

fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    let rule_set = load_rule_set(&config)?;
    log::info!("using rule set '{}'", rule_set.name);

    let document = load_tree(&config.tree)?;
    let lines = SourceLines::load(&config.source)?;
    let file = config.source.display().to_string();

    let diagnostics = validate_document(&document, &rule_set, &file, &lines)
        .context("checker registry misconfigured")?;

    match config.format {
        ReportFormat::Text => print!("{}", report::render_text(&diagnostics)),
        ReportFormat::Json => println!("{}", report::render_json(&diagnostics)?),
    }

    if report::has_errors(&diagnostics) {
        std::process::exit(1);
    }
    Ok(())
}

/// Pick the rule set: explicit file, then a named set from the rules
/// directories, then the embedded default.
fn load_rule_set(config: &Config) -> Result<rules::RuleSet> {
    if let Some(path) = &config.rules_file {
        return rules::load_rules(path);
    }
    if let Some(name) = &config.rules_name {
        if let Some(path) = rules::find_named(name, &config.rules_dirs) {
            return rules::load_rules(&path);
        }
        anyhow::bail!(
            "rule set '{name}' not found in {} directories",
            config.rules_dirs.len()
        );
    }
    Ok(rules::embedded_default())
}
