//! The rules engine pipeline.
//!
//! One call runs the full pipeline: domain resolvers → candidate
//! aggregation → guideline reconciliation → sequencing and validation
//! → scoring → confidence → audit. The engine is pure over its inputs;
//! the metadata store is read-only throughout.

use icd_types::{FindingSet, SequencedCode};
use tracing::info;

use crate::aggregate;
use crate::audit;
use crate::confidence::{self, ConfidenceFactor};
use crate::metadata::CodeMetadataStore;
use crate::reconcile;
use crate::scoring;
use crate::sequencing;

/// The complete engine output for one encounter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RulesEngineOutput {
    /// Final scored code sequence; empty when `errors` is non-empty.
    pub sequence: Vec<SequencedCode>,
    /// Per-code rationale lines.
    pub rationale: Vec<String>,
    /// Documentation and reconciliation warnings.
    pub warnings: Vec<String>,
    /// Hard errors that emptied the sequence.
    pub errors: Vec<String>,
    /// Human-readable audit trail.
    pub audit: Vec<String>,
    /// Encounter confidence in [0, 1].
    pub confidence: f64,
    /// The itemized adjustments behind `confidence`.
    pub confidence_factors: Vec<ConfidenceFactor>,
}

/// Runs the full rules-engine pipeline over one finding set.
pub fn run_rules_engine(findings: &FindingSet, metadata: &CodeMetadataStore) -> RulesEngineOutput {
    let pool = aggregate::aggregate(findings);
    let reconciled = reconcile::reconcile(pool, metadata, findings);
    let sequenced = sequencing::sequence(reconciled);

    let rationale: Vec<String> = sequenced
        .candidates
        .iter()
        .filter_map(|c| {
            c.candidate
                .guideline_rule
                .as_ref()
                .or(c.candidate.rationale.as_ref())
                .map(|reason| format!("{}: {reason}", c.candidate.code))
        })
        .collect();

    let sequence = scoring::score(&sequenced.candidates);
    let report = confidence::estimate(&sequence, &sequenced.warnings);
    let audit = audit::build(
        &sequence,
        &sequenced.rules_fired,
        &sequenced.warnings,
        &sequenced.errors,
        &report,
    );

    info!(
        codes = sequence.len(),
        warnings = sequenced.warnings.len(),
        errors = sequenced.errors.len(),
        confidence = report.value,
        "encounter encoded"
    );

    RulesEngineOutput {
        sequence,
        rationale,
        warnings: sequenced.warnings,
        errors: sequenced.errors,
        audit,
        confidence: report.value,
        confidence_factors: report.factors,
    }
}
