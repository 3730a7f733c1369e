//! Rule-Set System
//!
//! Declarative structure rules loaded from TOML: per-identity cardinality,
//! ordering constraints, and field-level checks.

pub mod loader;
pub mod schema;

pub use loader::{embedded_default, find_named, load_rules};
pub use schema::{
    FieldChecks, Identity, OccurrenceDef, OrderConfig, PairConstraint, RuleDescriptor, RuleFile,
    RuleSet,
};
