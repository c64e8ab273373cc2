//! Sequence validators.
//!
//! Independent checks run over the final order. Validators never
//! rewrite; a failed validator is a hard error and the engine returns
//! an empty sequence for the encounter.

use icd_types::code;

use crate::aggregate::PooledCandidate;
use crate::sequencing::rules::ETIOLOGY_PAIRS;

/// Runs every validator and returns the collected errors.
pub fn validate(candidates: &[PooledCandidate]) -> Vec<String> {
    let mut errors = Vec::new();
    check_no_duplicates(candidates, &mut errors);
    check_severity_has_sepsis(candidates, &mut errors);
    check_etiology_order(candidates, &mut errors);
    check_external_causes_last(candidates, &mut errors);
    errors
}

fn check_no_duplicates(candidates: &[PooledCandidate], errors: &mut Vec<String>) {
    for (i, candidate) in candidates.iter().enumerate() {
        if candidates[..i]
            .iter()
            .any(|c| c.candidate.code == candidate.candidate.code)
        {
            errors.push(format!(
                "Duplicate code in sequence: {}",
                candidate.candidate.code
            ));
        }
    }
}

/// R65.2x is never reportable without a preceding systemic infection
/// code.
fn check_severity_has_sepsis(candidates: &[PooledCandidate], errors: &mut Vec<String>) {
    let Some(severity_pos) = candidates
        .iter()
        .position(|c| c.candidate.code.starts_with("R65.2"))
    else {
        return;
    };
    let sepsis_before = candidates[..severity_pos]
        .iter()
        .any(|c| code::is_sepsis_code(&c.candidate.code));
    if !sepsis_before {
        errors.push(format!(
            "{} requires a preceding systemic infection code",
            candidates[severity_pos].candidate.code
        ));
    }
}

fn check_etiology_order(candidates: &[PooledCandidate], errors: &mut Vec<String>) {
    for (etiologies, manifestations) in ETIOLOGY_PAIRS {
        let etiology = candidates
            .iter()
            .position(|c| etiologies.iter().any(|p| c.candidate.code.starts_with(p)));
        let manifestation = candidates
            .iter()
            .position(|c| manifestations.iter().any(|p| c.candidate.code.starts_with(p)));
        if let (Some(e), Some(m)) = (etiology, manifestation) {
            if m < e {
                errors.push(format!(
                    "{} must follow its etiology {}",
                    candidates[m].candidate.code, candidates[e].candidate.code
                ));
            }
        }
    }
}

fn check_external_causes_last(candidates: &[PooledCandidate], errors: &mut Vec<String>) {
    let Some(first_external) = candidates
        .iter()
        .position(|c| code::is_external_cause(&c.candidate.code))
    else {
        return;
    };
    if candidates[first_external..]
        .iter()
        .any(|c| !code::is_external_cause(&c.candidate.code))
    {
        errors.push(format!(
            "External cause code {} must be sequenced last",
            candidates[first_external].candidate.code
        ));
    }
}
