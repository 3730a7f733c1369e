//! Rule-Set Schema Types
//!
//! The TOML rule-file structure and the runtime `RuleSet` it converts into.
//! The file form is plain serde data; the runtime form pre-compiles regexes
//! and builds identity-keyed lookup maps.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::diagnostics::Severity;
use crate::document::Node;
use crate::validation::classify::BlockKind;

/// Occurrence-tracking key: a block kind, optionally scoped by a name. All
/// unnamed blocks of a kind share one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub kind: BlockKind,
    pub name: Option<String>,
}

impl Identity {
    pub fn of(kind: BlockKind) -> Self {
        Self { kind, name: None }
    }

    pub fn named(kind: BlockKind, name: &str) -> Self {
        Self {
            kind,
            name: Some(name.to_string()),
        }
    }

    /// Parse `"kind"` or `"kind:name"`.
    pub fn parse(s: &str) -> Result<Self> {
        let (kind_str, name) = match s.split_once(':') {
            Some((kind, name)) => (kind, Some(name.to_string())),
            None => (s, None),
        };
        let kind: BlockKind = kind_str
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .with_context(|| format!("invalid identity '{s}'"))?;
        Ok(Self { kind, name })
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}:{}", self.kind, name),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Root rule file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleFile {
    pub ruleset: RuleSetMeta,
    #[serde(default)]
    pub blocks: Vec<BlockRuleDef>,
    pub order: Option<OrderDef>,
}

/// Rule-set metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleSetMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Configured expectation for one block kind, as written in the rule file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BlockRuleDef {
    pub kind: BlockKind,
    pub name: Option<String>,
    #[serde(default = "default_severity")]
    pub severity: Severity,
    pub occurrence: Option<OccurrenceDef>,
    #[serde(default)]
    pub title_required: bool,
    pub title_pattern: Option<String>,
    #[serde(default)]
    pub required_attributes: Vec<String>,
    pub min_lines: Option<u32>,
    pub max_lines: Option<u32>,
    #[serde(default)]
    pub languages: Vec<String>,
}

fn default_severity() -> Severity {
    Severity::Warning
}

/// Cardinality bounds for one identity.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct OccurrenceDef {
    #[serde(default)]
    pub min: u32,
    pub max: Option<u32>,
    pub severity: Option<Severity>,
}

/// Ordering configuration, as written in the rule file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OrderDef {
    #[serde(default = "default_severity")]
    pub severity: Severity,
    #[serde(default)]
    pub fixed: Vec<String>,
    #[serde(default)]
    pub before: Vec<PairDef>,
    #[serde(default)]
    pub after: Vec<PairDef>,
}

/// One pairwise order constraint, as written in the rule file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PairDef {
    pub first: String,
    pub second: String,
    pub severity: Option<Severity>,
}

/// Runtime rule descriptor: the configured expectation for one identity,
/// immutable once loaded.
#[derive(Debug)]
pub struct RuleDescriptor {
    pub identity: Identity,
    pub severity: Severity,
    pub occurrence: Option<OccurrenceDef>,
    pub checks: FieldChecks,
}

/// Field-level checks a leaf checker applies, pre-compiled.
#[derive(Debug, Default)]
pub struct FieldChecks {
    pub title_required: bool,
    pub title_pattern: Option<Regex>,
    pub required_attributes: Vec<String>,
    pub min_lines: Option<u32>,
    pub max_lines: Option<u32>,
    pub languages: Vec<String>,
}

/// Runtime ordering configuration with parsed identities.
#[derive(Debug)]
pub struct OrderConfig {
    pub severity: Severity,
    pub fixed: Vec<Identity>,
    pub before: Vec<PairConstraint>,
    pub after: Vec<PairConstraint>,
}

/// Pairwise relation between two identities.
#[derive(Debug)]
pub struct PairConstraint {
    pub first: Identity,
    pub second: Identity,
    pub severity: Option<Severity>,
}

/// Runtime rule set (optimized for lookups)
#[derive(Debug)]
pub struct RuleSet {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    named: HashMap<Identity, RuleDescriptor>,
    unnamed: HashMap<BlockKind, RuleDescriptor>,
    defaults: HashMap<BlockKind, RuleDescriptor>,
    order: Option<OrderConfig>,
}

impl RuleSet {
    /// Convert a parsed rule file into the runtime form. Fails on duplicate
    /// identities, unparsable order identities, or invalid title patterns.
    pub fn from_file(file: RuleFile) -> Result<Self> {
        let mut named = HashMap::new();
        let mut unnamed = HashMap::new();

        for def in file.blocks {
            let identity = match &def.name {
                Some(name) => Identity::named(def.kind, name),
                None => Identity::of(def.kind),
            };
            let descriptor = RuleDescriptor {
                identity: identity.clone(),
                severity: def.severity,
                occurrence: def.occurrence,
                checks: FieldChecks {
                    title_required: def.title_required,
                    title_pattern: def
                        .title_pattern
                        .as_deref()
                        .map(Regex::new)
                        .transpose()
                        .with_context(|| format!("invalid title pattern for '{identity}'"))?,
                    required_attributes: def.required_attributes,
                    min_lines: def.min_lines,
                    max_lines: def.max_lines,
                    languages: def.languages,
                },
            };
            let duplicate = if identity.name.is_some() {
                named.insert(identity.clone(), descriptor).is_some()
            } else {
                unnamed.insert(identity.kind, descriptor).is_some()
            };
            if duplicate {
                bail!("duplicate rule for identity '{identity}'");
            }
        }

        // Blocks whose identity has no configured rule are still tracked, so
        // every kind gets a default descriptor with nothing configured.
        let defaults = BlockKind::ALL
            .into_iter()
            .chain([BlockKind::Unknown])
            .map(|kind| {
                (
                    kind,
                    RuleDescriptor {
                        identity: Identity::of(kind),
                        severity: default_severity(),
                        occurrence: None,
                        checks: FieldChecks::default(),
                    },
                )
            })
            .collect();

        let order = file.order.map(convert_order).transpose()?;

        Ok(Self {
            name: file.ruleset.name,
            version: file.ruleset.version,
            description: file.ruleset.description,
            named,
            unnamed,
            defaults,
            order,
        })
    }

    /// Find the descriptor governing a classified block.
    ///
    /// A named rule matches on the node's `id` attribute, then on its title;
    /// otherwise the kind's unnamed rule applies, and a default descriptor
    /// covers kinds with no configuration at all.
    pub fn rule_for(&self, kind: BlockKind, node: &Node) -> &RuleDescriptor {
        if let Some(id) = node.id.as_deref() {
            if let Some(rule) = self.named.get(&Identity::named(kind, id)) {
                return rule;
            }
        }
        if let Some(title) = node.title.as_deref() {
            if let Some(rule) = self.named.get(&Identity::named(kind, title)) {
                return rule;
            }
        }
        if let Some(rule) = self.unnamed.get(&kind) {
            return rule;
        }
        &self.defaults[&kind]
    }

    /// All configured descriptors (named and unnamed), for the occurrence
    /// validator. Sorted by identity so diagnostic order is stable.
    pub fn configured(&self) -> impl Iterator<Item = &RuleDescriptor> {
        let mut all: Vec<&RuleDescriptor> =
            self.unnamed.values().chain(self.named.values()).collect();
        all.sort_by_key(|r| r.identity.to_string());
        all.into_iter()
    }

    pub fn order(&self) -> Option<&OrderConfig> {
        self.order.as_ref()
    }
}

fn convert_order(def: OrderDef) -> Result<OrderConfig> {
    let fixed = def
        .fixed
        .iter()
        .map(|s| Identity::parse(s))
        .collect::<Result<Vec<_>>>()
        .context("invalid identity in fixed order list")?;
    let convert_pairs = |pairs: Vec<PairDef>| -> Result<Vec<PairConstraint>> {
        pairs
            .into_iter()
            .map(|p| {
                Ok(PairConstraint {
                    first: Identity::parse(&p.first)?,
                    second: Identity::parse(&p.second)?,
                    severity: p.severity,
                })
            })
            .collect()
    };
    Ok(OrderConfig {
        severity: def.severity,
        fixed,
        before: convert_pairs(def.before).context("invalid before constraint")?,
        after: convert_pairs(def.after).context("invalid after constraint")?,
    })
}
