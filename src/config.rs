//! Configuration management for the structure linter.
//!
//! Handles:
//! - Command-line argument parsing
//! - Rules directory configuration

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Output format for the diagnostic report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Command-line arguments for the structure linter
#[derive(Debug, Parser)]
#[command(name = "adoc-lint")]
#[command(about = "Structure linter for AsciiDoc documents")]
#[command(version)]
pub struct Args {
    /// Path to the document source (.adoc)
    pub source: PathBuf,

    /// Path to the parsed document tree (JSON); defaults to <source>.json
    #[arg(long, help = "Parsed document tree emitted by the external parser")]
    pub tree: Option<PathBuf>,

    /// Explicit rule-set file to use
    #[arg(long, help = "Rule-set TOML file")]
    pub rules: Option<PathBuf>,

    /// Named rule set to search for in the rules directories
    #[arg(long, help = "Rule-set name to look up (e.g. 'docs')")]
    pub rules_name: Option<String>,

    /// Custom rules directory to search for rule-set files
    #[arg(long, help = "Directory containing <name>.rules.toml files")]
    pub rules_dir: Option<PathBuf>,

    /// Report output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Log level for the linter
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Document source path
    pub source: PathBuf,
    /// Parsed-tree path (defaults to `<source>.json`)
    pub tree: PathBuf,
    /// Explicit rule-set file from the command line
    pub rules_file: Option<PathBuf>,
    /// Named rule set to search the rules directories for
    pub rules_name: Option<String>,
    /// Rules directories to search
    pub rules_dirs: Vec<PathBuf>,
    /// Report format
    pub format: ReportFormat,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        // Determine rules directories
        let mut rules_dirs = Vec::new();

        // Add user-specified directory if provided
        if let Some(custom_dir) = args.rules_dir {
            rules_dirs.push(custom_dir);
        }

        // Add default user config directory
        if let Some(config_dir) = dirs::config_dir() {
            rules_dirs.push(config_dir.join("adoc-lint").join("rules"));
        }

        let tree = args
            .tree
            .unwrap_or_else(|| args.source.with_extension("json"));

        Ok(Config {
            source: args.source,
            tree,
            rules_file: args.rules,
            rules_name: args.rules_name,
            rules_dirs,
            format: args.format,
            log_level: args.log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["adoc-lint", "doc.adoc"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_tree_defaults_next_to_source() {
        let config = Config::from_args(args(&[])).unwrap();
        assert_eq!(config.tree, PathBuf::from("doc.json"));
    }

    #[test]
    fn test_explicit_tree_and_rules() {
        let config =
            Config::from_args(args(&["--tree", "out/tree.json", "--rules", "my.rules.toml"]))
                .unwrap();
        assert_eq!(config.tree, PathBuf::from("out/tree.json"));
        assert_eq!(config.rules_file, Some(PathBuf::from("my.rules.toml")));
    }

    #[test]
    fn test_custom_rules_dir_searched_first() {
        let config = Config::from_args(args(&["--rules-dir", "/tmp/rules"])).unwrap();
        assert_eq!(config.rules_dirs[0], PathBuf::from("/tmp/rules"));
    }

    #[test]
    fn test_default_format_is_text() {
        let config = Config::from_args(args(&[])).unwrap();
        assert_eq!(config.format, ReportFormat::Text);
    }
}
