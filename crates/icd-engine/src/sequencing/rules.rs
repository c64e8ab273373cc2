//! Sequencing rules.
//!
//! Each rule is a guarded rewrite of the candidate order. Rules fire
//! in ascending priority; a rule whose guard does not match leaves the
//! order untouched. All rewrites are stable: codes a rule does not
//! name keep their relative order.

use icd_types::code;
use tracing::debug;

use crate::aggregate::PooledCandidate;

/// A prioritized, guarded rewrite of the candidate order.
pub struct SequencingRule {
    /// Firing order; lower fires first.
    pub priority: u8,
    /// Rule name, recorded in the audit trail when the rule fires.
    pub name: &'static str,
    /// Guard: does this rule apply to the current order?
    pub applies: fn(&[PooledCandidate]) -> bool,
    /// The rewrite, run only when the guard matches.
    pub rewrite: fn(&mut Vec<PooledCandidate>),
}

/// All sequencing rules in firing order.
pub const RULES: &[SequencingRule] = &[
    SequencingRule {
        priority: 1,
        name: "post-procedural sepsis: complication code first",
        applies: |candidates| {
            has_code(candidates, |c| c.starts_with("T81.44"))
                && has_code(candidates, |c| code::is_sepsis_code(c))
        },
        rewrite: post_procedural_sepsis_first,
    },
    SequencingRule {
        priority: 2,
        name: "severe sepsis / septic shock immediately follows the infection",
        applies: |candidates| {
            has_code(candidates, |c| c.starts_with("R65.2"))
                && has_code(candidates, |c| code::is_sepsis_code(c))
        },
        rewrite: severity_after_sepsis,
    },
    SequencingRule {
        priority: 3,
        name: "post-traumatic pain immediately follows its injury",
        applies: |candidates| {
            has_code(candidates, |c| c.starts_with("G89"))
                && has_code(candidates, |c| code::is_traumatic_injury(c))
        },
        rewrite: pain_after_injury,
    },
    SequencingRule {
        priority: 4,
        name: "etiology before manifestation",
        applies: |candidates| etiology_pairs_out_of_order(candidates),
        rewrite: etiology_before_manifestation,
    },
    SequencingRule {
        priority: 10,
        name: "external cause codes last",
        applies: |candidates| {
            // Any external cause code followed by a non-external code.
            candidates
                .iter()
                .position(|c| code::is_external_cause(&c.candidate.code))
                .is_some_and(|first| {
                    candidates[first..]
                        .iter()
                        .any(|c| !code::is_external_cause(&c.candidate.code))
                })
        },
        rewrite: external_causes_last,
    },
];

/// Etiology/manifestation prefix pairs the sequencing honors: the
/// first-named code must precede the second when both are present.
pub(crate) const ETIOLOGY_PAIRS: &[(&[&str], &[&str])] = &[
    // Systemic infection before its severity code.
    (&["A40", "A41"], &["R65.2"]),
    // Combination codes before their mandated companions.
    (&["E08.22", "E09.22", "E10.22", "E11.22", "E13.22", "I12", "I13"], &["N18"]),
    (&["I11", "I13"], &["I50"]),
    // COPD-with-infection combination before the infection itself.
    (&["J44.0"], &["J12", "J13", "J14", "J15", "J16", "J18"]),
];

/// Applies every rule whose guard matches, in priority order, and
/// returns the names of the rules that fired.
pub fn apply_rules(candidates: &mut Vec<PooledCandidate>) -> Vec<&'static str> {
    let mut fired = Vec::new();
    for rule in RULES {
        if (rule.applies)(candidates) {
            debug!(priority = rule.priority, rule = rule.name, "sequencing rule fired");
            (rule.rewrite)(candidates);
            fired.push(rule.name);
        }
    }
    fired
}

fn has_code(candidates: &[PooledCandidate], pred: impl Fn(&str) -> bool) -> bool {
    candidates.iter().any(|c| pred(&c.candidate.code))
}

/// Moves a matching candidate to `index`, preserving the order of
/// everything else.
fn move_to(candidates: &mut Vec<PooledCandidate>, index: usize, pred: impl Fn(&str) -> bool) {
    if let Some(pos) = candidates.iter().position(|c| pred(&c.candidate.code)) {
        let candidate = candidates.remove(pos);
        candidates.insert(index.min(candidates.len()), candidate);
    }
}

fn post_procedural_sepsis_first(candidates: &mut Vec<PooledCandidate>) {
    move_to(candidates, 0, |c| c.starts_with("T81.44"));
    move_to(candidates, 1, code::is_sepsis_code);
}

fn severity_after_sepsis(candidates: &mut Vec<PooledCandidate>) {
    if let Some(sepsis_pos) = candidates
        .iter()
        .position(|c| code::is_sepsis_code(&c.candidate.code))
    {
        move_to(candidates, sepsis_pos + 1, |c| c.starts_with("R65.2"));
    }
}

fn pain_after_injury(candidates: &mut Vec<PooledCandidate>) {
    // Anchor on the traumatic injury itself; a poisoning or
    // complication T-code sequenced ahead of it is not the injury.
    if let Some(injury_pos) = candidates
        .iter()
        .position(|c| code::is_traumatic_injury(&c.candidate.code))
    {
        move_to(candidates, injury_pos + 1, |c| c.starts_with("G89"));
    }
}

fn etiology_pairs_out_of_order(candidates: &[PooledCandidate]) -> bool {
    for (etiologies, manifestations) in ETIOLOGY_PAIRS {
        let etiology = candidates
            .iter()
            .position(|c| etiologies.iter().any(|p| c.candidate.code.starts_with(p)));
        let manifestation = candidates
            .iter()
            .position(|c| manifestations.iter().any(|p| c.candidate.code.starts_with(p)));
        if let (Some(e), Some(m)) = (etiology, manifestation) {
            if m < e {
                return true;
            }
        }
    }
    false
}

fn etiology_before_manifestation(candidates: &mut Vec<PooledCandidate>) {
    for (etiologies, manifestations) in ETIOLOGY_PAIRS {
        let etiology = candidates
            .iter()
            .position(|c| etiologies.iter().any(|p| c.candidate.code.starts_with(p)));
        let manifestation = candidates
            .iter()
            .position(|c| manifestations.iter().any(|p| c.candidate.code.starts_with(p)));
        if let (Some(e), Some(m)) = (etiology, manifestation) {
            if m < e {
                let moved = candidates.remove(m);
                // The etiology shifted left by one after the removal.
                candidates.insert(e, moved);
            }
        }
    }
}

fn external_causes_last(candidates: &mut Vec<PooledCandidate>) {
    let (mut rest, external): (Vec<_>, Vec<_>) = candidates
        .drain(..)
        .partition(|c| !code::is_external_cause(&c.candidate.code));
    rest.extend(external);
    *candidates = rest;
}

#[cfg(test)]
mod tests {
    use super::*;
    use icd_types::CandidateCode;

    fn pooled(code: &str) -> PooledCandidate {
        PooledCandidate {
            candidate: CandidateCode::new(code, "test", "test", 0.8),
            kind: None,
        }
    }

    fn codes(candidates: &[PooledCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.candidate.code.as_str()).collect()
    }

    #[test]
    fn test_post_procedural_sepsis_ordering() {
        let mut candidates = vec![pooled("A41.9"), pooled("T81.44XA"), pooled("R65.20")];
        let fired = apply_rules(&mut candidates);
        assert_eq!(codes(&candidates), vec!["T81.44XA", "A41.9", "R65.20"]);
        assert!(fired.iter().any(|name| name.contains("post-procedural")));
    }

    #[test]
    fn test_shock_follows_sepsis() {
        let mut candidates = vec![pooled("A41.9"), pooled("N39.0"), pooled("R65.21")];
        apply_rules(&mut candidates);
        assert_eq!(codes(&candidates), vec!["A41.9", "R65.21", "N39.0"]);
    }

    #[test]
    fn test_pain_follows_injury() {
        let mut candidates = vec![pooled("S72.91XA"), pooled("I10"), pooled("G89.11")];
        apply_rules(&mut candidates);
        assert_eq!(codes(&candidates), vec!["S72.91XA", "G89.11", "I10"]);
    }

    #[test]
    fn test_pain_anchors_on_injury_not_poisoning_code() {
        // A leading poisoning T-code is not the injury; the pain code
        // must still land immediately after the S-chapter code.
        let mut candidates = vec![pooled("T40.2X1A"), pooled("G89.11"), pooled("S72.92XA")];
        apply_rules(&mut candidates);
        assert_eq!(codes(&candidates), vec!["T40.2X1A", "S72.92XA", "G89.11"]);
    }

    #[test]
    fn test_etiology_before_manifestation() {
        let mut candidates = vec![pooled("N18.30"), pooled("I12.9")];
        apply_rules(&mut candidates);
        assert_eq!(codes(&candidates), vec!["I12.9", "N18.30"]);
    }

    #[test]
    fn test_external_causes_move_last() {
        let mut candidates = vec![pooled("W19.XXXA"), pooled("S82.902A"), pooled("G89.11")];
        let fired = apply_rules(&mut candidates);
        assert_eq!(codes(&candidates), vec!["S82.902A", "G89.11", "W19.XXXA"]);
        assert!(fired.iter().any(|name| name.contains("external cause")));
    }

    #[test]
    fn test_no_rules_fire_on_ordered_pool() {
        let mut candidates = vec![pooled("E11.22"), pooled("N18.30")];
        let fired = apply_rules(&mut candidates);
        assert!(fired.is_empty());
        assert_eq!(codes(&candidates), vec!["E11.22", "N18.30"]);
    }
}
