//! Excludes1 / Excludes2 reconciliation.
//!
//! Excludes1 pairs cannot be reported together: one side is dropped
//! and the drop is warned. Excludes2 means "not included here" and
//! both codes stand, with an advisory note.

use icd_types::{code, FindingSet};
use tracing::debug;

use crate::aggregate::PooledCandidate;
use crate::metadata::CodeMetadataStore;

/// Applies Excludes1 and Excludes2 notes across the candidate pool.
pub fn apply(
    candidates: &mut Vec<PooledCandidate>,
    metadata: &CodeMetadataStore,
    findings: &FindingSet,
    warnings: &mut Vec<String>,
) {
    apply_excludes1(candidates, metadata, findings, warnings);
    apply_excludes2(candidates, metadata, warnings);
}

fn apply_excludes1(
    candidates: &mut Vec<PooledCandidate>,
    metadata: &CodeMetadataStore,
    findings: &FindingSet,
    warnings: &mut Vec<String>,
) {
    // Collect the losing codes first so iteration order cannot observe
    // partial removals.
    let mut dropped: Vec<String> = Vec::new();
    for holder in candidates.iter() {
        // An already-eliminated code has no say in further conflicts.
        if dropped.contains(&holder.candidate.code) {
            continue;
        }
        for excluded in metadata.get_excludes1_codes(&holder.candidate.code) {
            for other in candidates.iter() {
                if other.candidate.code == holder.candidate.code
                    || dropped.contains(&other.candidate.code)
                {
                    continue;
                }
                if !code::matches_prefix(&other.candidate.code, &excluded) {
                    continue;
                }
                let loser = pick_loser(holder, other, findings);
                if !dropped.contains(&loser.candidate.code) {
                    debug!(
                        kept = %winner_code(holder, other, &loser),
                        dropped = %loser.candidate.code,
                        "Excludes1 conflict"
                    );
                    warnings.push(format!(
                        "Excludes1: {} cannot be reported with {}; dropped {}",
                        holder.candidate.code, other.candidate.code, loser.candidate.code
                    ));
                    dropped.push(loser.candidate.code.clone());
                }
            }
        }
    }
    candidates.retain(|c| !dropped.contains(&c.candidate.code));
}

fn winner_code<'a>(
    a: &'a PooledCandidate,
    b: &'a PooledCandidate,
    loser: &PooledCandidate,
) -> &'a str {
    if a.candidate.code == loser.candidate.code {
        &b.candidate.code
    } else {
        &a.candidate.code
    }
}

/// Decides which side of an Excludes1 conflict is dropped.
///
/// The more specific code survives; on a tie, a diabetes-family code
/// survives when the encounter documents diabetes, then the higher
/// base score, then the lexicographically smaller code.
fn pick_loser(
    a: &PooledCandidate,
    b: &PooledCandidate,
    findings: &FindingSet,
) -> PooledCandidate {
    let spec_a = code::specificity(&a.candidate.code);
    let spec_b = code::specificity(&b.candidate.code);
    if spec_a != spec_b {
        return if spec_a > spec_b { b.clone() } else { a.clone() };
    }

    if findings.diabetes.is_some() {
        let dm_a = code::is_diabetes_family(&a.candidate.code);
        let dm_b = code::is_diabetes_family(&b.candidate.code);
        if dm_a != dm_b {
            return if dm_a { b.clone() } else { a.clone() };
        }
    }

    if a.candidate.base_score != b.candidate.base_score {
        return if a.candidate.base_score > b.candidate.base_score {
            b.clone()
        } else {
            a.clone()
        };
    }

    if a.candidate.code <= b.candidate.code {
        b.clone()
    } else {
        a.clone()
    }
}

fn apply_excludes2(
    candidates: &[PooledCandidate],
    metadata: &CodeMetadataStore,
    warnings: &mut Vec<String>,
) {
    for holder in candidates {
        for noted in metadata.get_excludes2_codes(&holder.candidate.code) {
            for other in candidates {
                if other.candidate.code != holder.candidate.code
                    && code::matches_prefix(&other.candidate.code, &noted)
                {
                    warnings.push(format!(
                        "Excludes2: {} is not part of {}; both are reported",
                        other.candidate.code, holder.candidate.code
                    ));
                }
            }
        }
    }
}
