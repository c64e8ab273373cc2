//! Confidence estimation.
//!
//! Produces one confidence value per encounter from a baseline plus
//! itemized adjustments, so the audit trail can show exactly what
//! raised or lowered it. An empty sequence always scores zero.

use icd_types::SequencedCode;

/// Starting confidence before adjustments.
const BASELINE: f64 = 0.70;
/// Penalty per warning.
const WARNING_PENALTY: f64 = 0.02;
/// Cap on the total warning penalty.
const WARNING_PENALTY_CAP: f64 = 0.10;

/// One named adjustment applied to the baseline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConfidenceFactor {
    /// What the adjustment reflects.
    pub name: String,
    /// Signed delta applied to the baseline.
    pub delta: f64,
}

/// The confidence value with its itemized factors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConfidenceReport {
    /// Final confidence in [0, 1].
    pub value: f64,
    /// The adjustments that produced it.
    pub factors: Vec<ConfidenceFactor>,
}

impl ConfidenceReport {
    fn empty() -> Self {
        Self {
            value: 0.0,
            factors: vec![ConfidenceFactor {
                name: "empty sequence".to_string(),
                delta: -BASELINE,
            }],
        }
    }
}

/// Estimates the confidence for a sequenced encounter.
pub fn estimate(sequence: &[SequencedCode], warnings: &[String]) -> ConfidenceReport {
    if sequence.is_empty() {
        return ConfidenceReport::empty();
    }

    let mut factors = Vec::new();
    let push = |factors: &mut Vec<ConfidenceFactor>, name: &str, delta: f64| {
        if delta != 0.0 {
            factors.push(ConfidenceFactor {
                name: name.to_string(),
                delta,
            });
        }
    };

    // Unspecified codes drag specificity down; fully specified codes
    // leave the baseline alone.
    let unspecified = sequence.iter().filter(|c| c.code.ends_with('9')).count();
    push(
        &mut factors,
        "unspecified codes in sequence",
        -0.03 * unspecified as f64,
    );

    if sequence.iter().any(|c| c.hcc) {
        push(&mut factors, "risk-adjusting codes captured", 0.05);
    }

    let warning_penalty =
        (warnings.len() as f64 * WARNING_PENALTY).min(WARNING_PENALTY_CAP);
    push(&mut factors, "documentation warnings", -warning_penalty);

    if warnings.iter().any(|w| w.contains("ambiguous")) {
        push(&mut factors, "ambiguous documentation wording", -0.10);
    }
    if warnings.iter().any(|w| w.contains("Laterality")) {
        push(&mut factors, "laterality not documented", -0.05);
    }
    if warnings.iter().any(|w| w.contains("initial encounter (A)")) {
        push(&mut factors, "encounter type defaulted", -0.05);
    }

    // A fuller picture of the encounter supports the sequence.
    let completeness = (sequence.len() as f64 * 0.01).min(0.05);
    push(&mut factors, "sequence completeness", completeness);

    let value = (BASELINE + factors.iter().map(|f| f.delta).sum::<f64>()).clamp(0.0, 1.0);
    ConfidenceReport { value, factors }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequenced(code: &str, hcc: bool) -> SequencedCode {
        SequencedCode {
            code: code.to_string(),
            label: "test".to_string(),
            triggered_by: "test".to_string(),
            hcc,
            score: Some(0.8),
        }
    }

    #[test]
    fn test_empty_sequence_scores_zero() {
        let report = estimate(&[], &[]);
        assert_eq!(report.value, 0.0);
        assert_eq!(report.factors[0].name, "empty sequence");
    }

    #[test]
    fn test_clean_specific_encounter_scores_above_baseline() {
        let sequence = vec![sequenced("E11.22", true), sequenced("N18.30", false)];
        let report = estimate(&sequence, &[]);
        assert!(report.value > BASELINE);
    }

    #[test]
    fn test_warnings_lower_confidence() {
        let sequence = vec![sequenced("A41.9", true)];
        let clean = estimate(&sequence, &[]);
        let warned = estimate(
            &sequence,
            &["Sepsis organism not identified; coded as unspecified organism".to_string()],
        );
        assert!(warned.value < clean.value);
    }

    #[test]
    fn test_ambiguity_penalty_is_itemized() {
        let sequence = vec![sequenced("C34.90", true)];
        let report = estimate(
            &sequence,
            &["Documentation wording is ambiguous between primary and metastatic malignancy"
                .to_string()],
        );
        assert!(report
            .factors
            .iter()
            .any(|f| f.name.contains("ambiguous") && f.delta < 0.0));
    }

    #[test]
    fn test_confidence_stays_in_range() {
        let sequence: Vec<SequencedCode> =
            (0..20).map(|_| sequenced("I10", false)).collect();
        let many_warnings: Vec<String> = (0..50).map(|i| format!("warning {i}")).collect();
        let report = estimate(&sequence, &many_warnings);
        assert!((0.0..=1.0).contains(&report.value));
    }
}
