//! Rule-Set Loading
//!
//! Loads rule sets from TOML files: an explicit path, a named set searched
//! across the configured rules directories, or the embedded default set.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::schema::{
    BlockRuleDef, OccurrenceDef, RuleFile, RuleSet, RuleSetMeta,
};
use crate::diagnostics::Severity;
use crate::validation::classify::BlockKind;

/// File suffix for rule sets in a rules directory.
const RULES_SUFFIX: &str = ".rules.toml";

/// Load a rule set from an explicit TOML file.
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rule set {}", path.display()))?;
    let file: RuleFile = toml::from_str(&text)
        .with_context(|| format!("invalid rule set in {}", path.display()))?;
    RuleSet::from_file(file)
}

/// Find a named rule set (`<name>.rules.toml`) in the given directories,
/// first match wins.
pub fn find_named(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .map(|dir| dir.join(format!("{name}{RULES_SUFFIX}")))
        .find(|candidate| candidate.is_file())
}

/// The embedded default rule set.
///
/// Falls back to a minimal built-in set if the embedded TOML fails to parse.
pub fn embedded_default() -> RuleSet {
    let embedded_toml = include_str!("../../resources/rules/default.rules.toml");

    match toml::from_str::<RuleFile>(embedded_toml).map_err(anyhow::Error::from) {
        Ok(file) => match RuleSet::from_file(file) {
            Ok(rules) => return rules,
            Err(e) => log::warn!("embedded default rule set is invalid: {e}"),
        },
        Err(e) => log::warn!("failed to parse embedded default rule set: {e}"),
    }
    minimal_default()
}

/// Minimal fallback in case the embedded TOML cannot be used.
fn minimal_default() -> RuleSet {
    let file = RuleFile {
        ruleset: RuleSetMeta {
            name: "default".to_string(),
            version: Some("minimal-fallback".to_string()),
            description: Some("Minimal fallback rule set".to_string()),
        },
        blocks: vec![BlockRuleDef {
            kind: BlockKind::Paragraph,
            name: None,
            severity: Severity::Warning,
            occurrence: Some(OccurrenceDef {
                min: 1,
                max: None,
                severity: None,
            }),
            title_required: false,
            title_pattern: None,
            required_attributes: Vec::new(),
            min_lines: None,
            max_lines: None,
            languages: Vec::new(),
        }],
        order: None,
    };
    // The literal above is well formed; from_file cannot fail on it.
    RuleSet::from_file(file).unwrap_or_else(|e| panic!("minimal rule set invalid: {e}"))
}
