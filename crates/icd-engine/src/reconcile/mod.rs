//! Guideline reconciliation.
//!
//! Takes the aggregated candidate pool and applies the cross-domain
//! coding conventions: combination-code subsumption, Excludes1/2
//! notes, hierarchy collapse, ordering overrides, and companion
//! insertion. Produces the reconciled pool the sequencing engine
//! consumes, plus any hard errors that make the encounter unsequenceable.

pub mod exclusions;
pub mod hierarchy;
pub mod overrides;

use icd_types::FindingSet;

use crate::aggregate::{CandidatePool, PooledCandidate};
use crate::metadata::CodeMetadataStore;

/// The reconciled candidate set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciledPool {
    /// Surviving candidates in sequencing-input order.
    pub candidates: Vec<PooledCandidate>,
    /// Warnings accumulated through aggregation and reconciliation.
    pub warnings: Vec<String>,
    /// Hard errors; any error empties the final sequence.
    pub errors: Vec<String>,
}

/// Reconciles the candidate pool against the coding conventions.
pub fn reconcile(
    pool: CandidatePool,
    metadata: &CodeMetadataStore,
    findings: &FindingSet,
) -> ReconciledPool {
    let mut candidates = pool.candidates;
    let mut warnings = pool.warnings;
    let mut errors = Vec::new();

    exclusions::apply(&mut candidates, metadata, findings, &mut warnings);
    hierarchy::collapse(&mut candidates, &mut warnings);
    overrides::apply(&mut candidates, metadata, findings, &mut warnings, &mut errors);

    ReconciledPool {
        candidates,
        warnings,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use icd_types::{
        CardiovascularFinding, CkdStage, DiabetesComplication, DiabetesFinding, DiabetesType,
        RenalFinding,
    };

    #[test]
    fn test_full_reconciliation_of_htn_dm_ckd_encounter() {
        // Type 2 diabetes with CKD stage 3 plus hypertension: the
        // diabetes combination code, the I12.9 combination code, and a
        // single N18.30 companion survive.
        let findings = FindingSet {
            diabetes: Some(DiabetesFinding {
                diabetes_type: Some(DiabetesType::Type2),
                complications: vec![DiabetesComplication::ChronicKidneyDisease],
                ckd_stage: Some(CkdStage::Stage3),
                ..Default::default()
            }),
            cardiovascular: Some(CardiovascularFinding {
                hypertension: true,
                ..Default::default()
            }),
            renal: Some(RenalFinding {
                ckd_stage: Some(CkdStage::Stage3),
                ..Default::default()
            }),
            ..Default::default()
        };
        let store = CodeMetadataStore::builtin();
        let reconciled = reconcile(aggregate(&findings), &store, &findings);

        assert!(reconciled.errors.is_empty());
        let codes: Vec<&str> = reconciled
            .candidates
            .iter()
            .map(|c| c.candidate.code.as_str())
            .collect();
        assert!(codes.contains(&"E11.22"));
        assert!(codes.contains(&"I12.9"));
        assert_eq!(codes.iter().filter(|c| c.starts_with("N18")).count(), 1);
        assert!(!codes.contains(&"I10"));
    }

    #[test]
    fn test_empty_pool_reconciles_to_empty() {
        let store = CodeMetadataStore::builtin();
        let findings = FindingSet::default();
        let reconciled = reconcile(aggregate(&findings), &store, &findings);
        assert!(reconciled.candidates.is_empty());
        assert!(reconciled.errors.is_empty());
    }
}
