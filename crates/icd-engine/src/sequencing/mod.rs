//! Sequencing engine.
//!
//! Orders the reconciled candidates per the sequencing rules, then
//! runs the independent validators over the result. Any validator
//! failure (or a reconciliation error) makes the encounter
//! unsequenceable: the sequence comes back empty with the errors
//! attached.

pub mod rules;
pub mod validators;

use crate::aggregate::PooledCandidate;
use crate::reconcile::ReconciledPool;

/// The sequencing result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequencedPool {
    /// Final candidate order; empty when `errors` is non-empty.
    pub candidates: Vec<PooledCandidate>,
    /// Names of the sequencing rules that fired, in firing order.
    pub rules_fired: Vec<&'static str>,
    /// Accumulated warnings.
    pub warnings: Vec<String>,
    /// Hard errors from reconciliation or validation.
    pub errors: Vec<String>,
}

/// Sequences a reconciled pool.
pub fn sequence(reconciled: ReconciledPool) -> SequencedPool {
    let mut errors = reconciled.errors;
    if !errors.is_empty() {
        return SequencedPool {
            candidates: Vec::new(),
            rules_fired: Vec::new(),
            warnings: reconciled.warnings,
            errors,
        };
    }

    let mut candidates = reconciled.candidates;
    let rules_fired = rules::apply_rules(&mut candidates);
    errors.extend(validators::validate(&candidates));

    if !errors.is_empty() {
        candidates.clear();
    }

    SequencedPool {
        candidates,
        rules_fired,
        warnings: reconciled.warnings,
        errors,
    }
}
