//! Guideline overrides.
//!
//! Cross-domain rules that exact code mutations on the pool after the
//! per-domain resolvers have run: the hypertension combination-code
//! hierarchy, diabetes-family collapse, neoplasm primary/secondary
//! ordering and contradiction detection, poisoning precedence, and
//! rule-text-driven companion insertion.

use icd_types::{code, well_known, CandidateCode, FindingSet, SecondaryKind};
use tracing::debug;

use crate::aggregate::PooledCandidate;
use crate::metadata::CodeMetadataStore;

/// Applies every override in fixed order.
pub fn apply(
    candidates: &mut Vec<PooledCandidate>,
    metadata: &CodeMetadataStore,
    findings: &FindingSet,
    warnings: &mut Vec<String>,
    errors: &mut Vec<String>,
) {
    collapse_hypertension(candidates, warnings);
    collapse_diabetes_family(candidates, warnings);
    check_neoplasm_contradiction(findings, errors);
    reorder_for_secondary_treatment(candidates, findings);
    order_poisoning(candidates, findings);
    insert_companions(candidates, metadata, warnings);
}

/// Hypertension combination hierarchy: I13 subsumes I12, I11, and I10;
/// I12 and I11 each subsume I10.
fn collapse_hypertension(candidates: &mut Vec<PooledCandidate>, warnings: &mut Vec<String>) {
    let has = |candidates: &[PooledCandidate], prefix: &str| {
        candidates.iter().any(|c| c.candidate.code.starts_with(prefix))
    };
    let mut subsumed: Vec<&str> = Vec::new();
    if has(candidates, "I13") {
        subsumed.extend(["I12", "I11", "I10"]);
    } else {
        if has(candidates, "I12") {
            subsumed.push("I10");
        }
        if has(candidates, "I11") {
            subsumed.push("I10");
        }
    }
    if subsumed.is_empty() {
        return;
    }
    candidates.retain(|c| {
        let keep = !subsumed.iter().any(|p| c.candidate.code.starts_with(p));
        if !keep {
            debug!(code = %c.candidate.code, "subsumed by hypertension combination code");
            warnings.push(format!(
                "{} is subsumed by a hypertension combination code",
                c.candidate.code
            ));
        }
        keep
    });
}

/// One diabetes-family code per encounter: the most specific survives,
/// ties broken by base score.
fn collapse_diabetes_family(candidates: &mut Vec<PooledCandidate>, warnings: &mut Vec<String>) {
    let family: Vec<PooledCandidate> = candidates
        .iter()
        .filter(|c| code::is_diabetes_family(&c.candidate.code))
        .cloned()
        .collect();
    if family.len() < 2 {
        return;
    }
    let keeper = family
        .iter()
        .max_by(|a, b| {
            code::specificity(&a.candidate.code)
                .cmp(&code::specificity(&b.candidate.code))
                .then(
                    a.candidate
                        .base_score
                        .partial_cmp(&b.candidate.base_score)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
        })
        .map(|c| c.candidate.code.clone())
        .unwrap_or_default();
    candidates.retain(|c| {
        let drop = code::is_diabetes_family(&c.candidate.code) && c.candidate.code != keeper;
        if drop {
            warnings.push(format!(
                "{} dropped; {keeper} already reports the diabetes for this encounter",
                c.candidate.code
            ));
        }
        !drop
    });
}

/// A site documented as both the primary and a metastatic site is a
/// contradiction the engine refuses to sequence.
fn check_neoplasm_contradiction(findings: &FindingSet, errors: &mut Vec<String>) {
    let Some(neoplasm) = findings.neoplasm.as_ref() else {
        return;
    };
    if let Some(primary_site) = neoplasm.primary_site {
        if neoplasm.metastatic_sites.contains(&primary_site) {
            errors.push(format!(
                "Contradictory neoplasm documentation: {primary_site:?} is recorded as both the \
                 primary and a metastatic site"
            ));
        }
    }
}

/// When treatment is directed at a metastatic site, its C77–C79 code
/// moves ahead of the primary malignancy.
fn reorder_for_secondary_treatment(candidates: &mut [PooledCandidate], findings: &FindingSet) {
    let directed = findings
        .neoplasm
        .as_ref()
        .map(|n| n.treatment_directed_at_secondary)
        .unwrap_or(false);
    if !directed {
        return;
    }
    // Stable partition: secondary-malignancy codes first among the
    // neoplasm candidates, everything else untouched.
    let is_secondary_malignancy = |c: &PooledCandidate| {
        matches!(c.candidate.code.get(..3), Some("C77" | "C78" | "C79"))
    };
    let neoplasm_positions: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.candidate.triggered_by == "neoplasm")
        .map(|(i, _)| i)
        .collect();
    let mut reordered: Vec<PooledCandidate> = Vec::with_capacity(neoplasm_positions.len());
    for &i in &neoplasm_positions {
        if is_secondary_malignancy(&candidates[i]) {
            reordered.push(candidates[i].clone());
        }
    }
    for &i in &neoplasm_positions {
        if !is_secondary_malignancy(&candidates[i]) {
            reordered.push(candidates[i].clone());
        }
    }
    for (&i, candidate) in neoplasm_positions.iter().zip(reordered) {
        candidates[i] = candidate;
    }
}

/// Poisoning T-codes lead their manifestations; adverse-effect and
/// underdosing T-codes trail them.
fn order_poisoning(candidates: &mut Vec<PooledCandidate>, findings: &FindingSet) {
    let Some(poisoning) = findings.poisoning.as_ref() else {
        return;
    };
    let Some(pos) = candidates
        .iter()
        .position(|c| c.candidate.triggered_by == "poisoning")
    else {
        return;
    };
    let t_code = candidates.remove(pos);
    if poisoning.intent.is_poisoning() {
        candidates.insert(0, t_code);
    } else {
        candidates.push(t_code);
    }
}

/// Inserts or demands the companions the metadata rule text names.
///
/// A hypertensive-heart combination without its mandated I50.x gets
/// I50.9 inserted; a missing N18.x companion is warned but never
/// fabricated, since the stage cannot be guessed.
fn insert_companions(
    candidates: &mut Vec<PooledCandidate>,
    metadata: &CodeMetadataStore,
    warnings: &mut Vec<String>,
) {
    let mut need_heart_failure = false;
    let mut want_ckd_stage = false;
    for candidate in candidates.iter() {
        for rule in metadata.get_rules_strings(&candidate.candidate.code) {
            let rule = rule.to_lowercase();
            if rule.contains("heart failure (i50") {
                need_heart_failure = true;
            }
            if rule.contains("chronic kidney disease (n18") {
                want_ckd_stage = true;
            }
        }
    }

    if need_heart_failure && !candidates.iter().any(|c| c.candidate.code.starts_with("I50")) {
        debug!("inserting I50.9 companion");
        candidates.push(PooledCandidate {
            candidate: CandidateCode::new(
                well_known::HEART_FAILURE_UNSPECIFIED,
                "Heart failure, unspecified",
                "reconciliation",
                0.6,
            )
            .with_guideline_rule("Use additional code to identify type of heart failure (I50.-)"),
            kind: Some(SecondaryKind::Manifestation),
        });
        warnings.push(
            "Heart failure type not documented; I50.9 inserted to satisfy the combination code"
                .to_string(),
        );
    }

    if want_ckd_stage && !candidates.iter().any(|c| c.candidate.code.starts_with("N18")) {
        warnings.push(
            "Combination code requires the chronic kidney disease stage (N18.-) but none is \
             documented"
                .to_string(),
        );
    }
}
