//! Diagnostic types
//!
//! Severity levels, source locations, and the diagnostic record emitted by
//! every validator. Diagnostics are produced, never mutated.

use serde::Serialize;

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Resolve the effective severity from the fallback chain.
///
/// The most specific configured severity wins (e.g. an occurrence-specific
/// severity); otherwise the fallback (typically the block-level severity)
/// applies. This is the only place the fallback rule lives.
pub fn resolve_severity(specific: Option<Severity>, fallback: Severity) -> Severity {
    specific.unwrap_or(fallback)
}

/// A 1-based inclusive source location for a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: String,
    pub start_line: u32,
    pub end_line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_col: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_col: Option<u32>,
}

impl Location {
    /// Location covering a line range with no column information.
    pub fn lines(file: &str, start_line: u32, end_line: u32) -> Self {
        Self {
            file: file.to_string(),
            start_line,
            end_line,
            start_col: None,
            end_col: None,
        }
    }

    /// Location pointing at a single line.
    pub fn line(file: &str, line: u32) -> Self {
        Self::lines(file, line, line)
    }
}

/// A diagnostic message for a validation issue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub rule_id: String,
    pub location: Location,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, rule_id: &str, location: Location, message: String) -> Self {
        Self {
            severity,
            rule_id: rule_id.to_string(),
            location,
            message,
            actual: None,
            expected: None,
            hint: None,
        }
    }

    pub fn with_actual(mut self, actual: String) -> Self {
        self.actual = Some(actual);
        self
    }

    pub fn with_expected(mut self, expected: String) -> Self {
        self.expected = Some(expected);
        self
    }

    pub fn with_hint(mut self, hint: String) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// Result of validating a document or container
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: Vec<Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_severity_prefers_specific() {
        assert_eq!(
            resolve_severity(Some(Severity::Error), Severity::Warning),
            Severity::Error
        );
        assert_eq!(
            resolve_severity(None, Severity::Warning),
            Severity::Warning
        );
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());

        result.push(Diagnostic::new(
            Severity::Warning,
            "test.warning",
            Location::line("doc.adoc", 1),
            "Test warning".to_string(),
        ));
        assert!(result.is_valid()); // Warnings don't make it invalid

        result.push(Diagnostic::new(
            Severity::Error,
            "test.error",
            Location::line("doc.adoc", 2),
            "Test error".to_string(),
        ));
        assert!(!result.is_valid()); // Errors make it invalid
    }

    #[test]
    fn test_location_line() {
        let loc = Location::line("doc.adoc", 5);
        assert_eq!(loc.start_line, 5);
        assert_eq!(loc.end_line, 5);
        assert!(loc.start_col.is_none());
    }
}
