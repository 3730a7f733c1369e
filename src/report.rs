//! Diagnostic Report Rendering
//!
//! Thin renderers over the diagnostic list: a line-oriented text form for
//! terminals and a JSON form for tooling.

use anyhow::Result;

use crate::diagnostics::{Diagnostic, Severity};

/// Render diagnostics as `file:line: severity: [rule] message` lines, with
/// hints indented below their diagnostic.
pub fn render_text(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diagnostics {
        let loc = &d.location;
        out.push_str(&format!(
            "{}:{}: {}: [{}] {}\n",
            loc.file, loc.start_line, d.severity, d.rule_id, d.message
        ));
        if let (Some(actual), Some(expected)) = (&d.actual, &d.expected) {
            out.push_str(&format!("    found {actual}, expected {expected}\n"));
        }
        if let Some(hint) = &d.hint {
            for line in hint.lines() {
                out.push_str(&format!("    {line}\n"));
            }
        }
    }
    out
}

/// Render diagnostics as pretty-printed JSON.
pub fn render_json(diagnostics: &[Diagnostic]) -> Result<String> {
    Ok(serde_json::to_string_pretty(diagnostics)?)
}

/// Whether any diagnostic carries error severity (drives the exit code).
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}
