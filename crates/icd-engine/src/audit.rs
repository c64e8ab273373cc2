//! Audit trail.
//!
//! Renders the engine's decisions as ordered, human-readable lines: one
//! per sequenced code, one per fired sequencing rule, then the warnings
//! and errors. The trail is for reviewers, not for machines; the
//! structured output carries the same facts.

use icd_types::SequencedCode;

use crate::confidence::ConfidenceReport;

/// Builds the audit lines for one encounter.
pub fn build(
    sequence: &[SequencedCode],
    rules_fired: &[&'static str],
    warnings: &[String],
    errors: &[String],
    confidence: &ConfidenceReport,
) -> Vec<String> {
    let mut lines = Vec::new();

    if sequence.is_empty() {
        lines.push("No codes sequenced for this encounter".to_string());
    }
    for (position, entry) in sequence.iter().enumerate() {
        let hcc = if entry.hcc { " [HCC]" } else { "" };
        lines.push(format!(
            "{}. {} {} (from {}){hcc}",
            position + 1,
            entry.code,
            entry.label,
            entry.triggered_by,
        ));
    }

    for rule in rules_fired {
        lines.push(format!("Sequencing rule applied: {rule}"));
    }
    for warning in warnings {
        lines.push(format!("Warning: {warning}"));
    }
    for error in errors {
        lines.push(format!("Error: {error}"));
    }

    lines.push(format!("Confidence: {:.2}", confidence.value));
    for factor in &confidence.factors {
        lines.push(format!("  {:+.2} {}", factor.delta, factor.name));
    }

    lines
}
