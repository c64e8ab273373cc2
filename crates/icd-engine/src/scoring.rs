//! Scoring and HCC flagging.
//!
//! Converts the sequenced candidates to their output form: each code
//! gets a risk-adjustment (HCC) flag from a compiled pattern set and a
//! display score derived from the resolver's base score, specificity,
//! and HCC status, clamped to [0, 1].

use std::sync::OnceLock;

use icd_types::{code, SequencedCode};
use regex::RegexSet;

use crate::aggregate::PooledCandidate;

/// Specificity bonus per character beyond the three-character category.
const SPECIFICITY_BONUS: f64 = 0.02;
/// Score bonus for a risk-adjusting code.
const HCC_BONUS: f64 = 0.05;

/// HCC category patterns, compiled once per process.
///
/// Uncomplicated diabetes (the `.9` family codes) is handled
/// separately since it does not risk-adjust.
fn hcc_patterns() -> &'static RegexSet {
    static PATTERNS: OnceLock<RegexSet> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        RegexSet::new([
            r"^N18\.[456]",   // CKD stage 4 through ESRD
            r"^N17",          // acute kidney failure
            r"^I50",          // heart failure
            r"^I13\.[02]",    // hypertensive heart and CKD with HF
            r"^J44",          // COPD
            r"^J96",          // respiratory failure
            r"^C\d",          // malignant neoplasms
            r"^A4[01]",       // sepsis
            r"^R65\.2",       // severe sepsis / septic shock
            r"^F31",          // bipolar disorder
            r"^F3[23]\.[23]", // major depression, severe
        ])
        .unwrap_or_else(|e| panic!("invalid HCC pattern set: {e}"))
    })
}

/// Returns true if the code maps to a Hierarchical Condition Category.
pub fn is_hcc(icd_code: &str) -> bool {
    if code::is_diabetes_family(icd_code) {
        // Any complicated diabetes code risk-adjusts.
        return !icd_code.ends_with(".9");
    }
    hcc_patterns().is_match(icd_code)
}

/// Per-code display score in [0, 1].
pub fn score_code(icd_code: &str, base_score: f64, hcc: bool) -> f64 {
    let specificity_over_category = code::specificity(icd_code).saturating_sub(3) as f64;
    let score = base_score
        + specificity_over_category * SPECIFICITY_BONUS
        + if hcc { HCC_BONUS } else { 0.0 };
    score.clamp(0.0, 1.0)
}

/// Converts the sequenced candidates to scored output codes.
pub fn score(candidates: &[PooledCandidate]) -> Vec<SequencedCode> {
    candidates
        .iter()
        .map(|c| {
            let hcc = is_hcc(&c.candidate.code);
            SequencedCode {
                code: c.candidate.code.clone(),
                label: c.candidate.label.clone(),
                triggered_by: c.candidate.triggered_by.clone(),
                hcc,
                score: Some(score_code(&c.candidate.code, c.candidate.base_score, hcc)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use icd_types::CandidateCode;

    #[test]
    fn test_hcc_flags() {
        assert!(is_hcc("E11.22"));
        assert!(is_hcc("N18.4"));
        assert!(is_hcc("I50.33"));
        assert!(is_hcc("C34.90"));
        assert!(is_hcc("A41.9"));
        assert!(is_hcc("J44.1"));
        assert!(is_hcc("F32.3"));

        assert!(!is_hcc("E11.9"));
        assert!(!is_hcc("I10"));
        assert!(!is_hcc("N18.30"));
        assert!(!is_hcc("F32.0"));
        assert!(!is_hcc("Z99.2"));
        assert!(!is_hcc("W19.XXXA"));
    }

    #[test]
    fn test_score_rewards_specificity_and_hcc() {
        let base = score_code("I10", 0.7, false);
        let specific = score_code("E11.22", 0.7, true);
        assert!(specific > base);
        assert!((0.0..=1.0).contains(&specific));
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(score_code("T50.905A", 0.99, true), 1.0);
        assert_eq!(score_code("I10", -0.5, false), 0.0);
    }

    #[test]
    fn test_score_output_shape() {
        let candidates = vec![PooledCandidate {
            candidate: CandidateCode::new("A41.9", "Sepsis, unspecified organism", "infection", 0.85),
            kind: None,
        }];
        let scored = score(&candidates);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].code, "A41.9");
        assert!(scored[0].hcc);
        assert!(scored[0].score.unwrap() > 0.85);
    }
}
