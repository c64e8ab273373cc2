//! Obstetric domain resolver.
//!
//! Chapter 15 codes split on trimester, so every table here takes the
//! documented trimester and warns when it is missing. Gestational
//! diabetes splits on control method instead.

use icd_types::{CandidateCode, FindingSet, ObstetricCondition, Resolution, Trimester};

/// Resolves the obstetric finding bundle, if present.
pub fn resolve(findings: &FindingSet) -> Option<Resolution> {
    let ob = findings.obstetric.as_ref()?;
    if !ob.pregnant && ob.condition.is_none() {
        return None;
    }
    let mut warnings = Vec::new();

    let primary = match ob.condition {
        Some(condition) => {
            let (icd_code, label) = condition_code(condition, ob.trimester, &mut warnings);
            CandidateCode::new(icd_code, label, "obstetrics", 0.85)
        }
        None => {
            // Pregnancy documented with no complicating condition.
            let (icd_code, label) = supervision_code(ob.trimester, &mut warnings);
            CandidateCode::new(icd_code, label, "obstetrics", 0.6)
        }
    };

    Some(Resolution {
        primary,
        secondary: Vec::new(),
        warnings,
    })
}

/// Condition × trimester code tables (O14, O21, O24).
fn condition_code(
    condition: ObstetricCondition,
    trimester: Option<Trimester>,
    warnings: &mut Vec<String>,
) -> (&'static str, &'static str) {
    use ObstetricCondition::*;
    match condition {
        GestationalDiabetesDietControlled => (
            "O24.410",
            "Gestational diabetes mellitus in pregnancy, diet controlled",
        ),
        GestationalDiabetesInsulinControlled => (
            "O24.414",
            "Gestational diabetes mellitus in pregnancy, insulin controlled",
        ),
        GestationalDiabetesUnspecifiedControl => {
            warnings.push(
                "Gestational diabetes control method not documented".to_string(),
            );
            (
                "O24.419",
                "Gestational diabetes mellitus in pregnancy, unspecified control",
            )
        }
        PreeclampsiaMildModerate => match resolved_trimester(trimester, warnings) {
            Some(Trimester::Second) => (
                "O14.02",
                "Mild to moderate pre-eclampsia, second trimester",
            ),
            Some(Trimester::Third) => ("O14.03", "Mild to moderate pre-eclampsia, third trimester"),
            _ => (
                "O14.00",
                "Mild to moderate pre-eclampsia, unspecified trimester",
            ),
        },
        PreeclampsiaSevere => match resolved_trimester(trimester, warnings) {
            Some(Trimester::Second) => ("O14.12", "Severe pre-eclampsia, second trimester"),
            Some(Trimester::Third) => ("O14.13", "Severe pre-eclampsia, third trimester"),
            _ => ("O14.10", "Severe pre-eclampsia, unspecified trimester"),
        },
        Hyperemesis => ("O21.0", "Mild hyperemesis gravidarum"),
    }
}

/// Trimester with a warning when undocumented; pre-eclampsia in the
/// first trimester has no dedicated code and falls to unspecified.
fn resolved_trimester(
    trimester: Option<Trimester>,
    warnings: &mut Vec<String>,
) -> Option<Trimester> {
    if trimester.is_none() {
        warnings.push("Trimester not documented; coded as unspecified trimester".to_string());
    }
    trimester
}

/// Supervision-of-pregnancy code by trimester (Z34.9x).
fn supervision_code(
    trimester: Option<Trimester>,
    warnings: &mut Vec<String>,
) -> (&'static str, &'static str) {
    match resolved_trimester(trimester, warnings) {
        Some(Trimester::First) => (
            "Z34.91",
            "Encounter for supervision of normal pregnancy, unspecified, first trimester",
        ),
        Some(Trimester::Second) => (
            "Z34.92",
            "Encounter for supervision of normal pregnancy, unspecified, second trimester",
        ),
        Some(Trimester::Third) => (
            "Z34.93",
            "Encounter for supervision of normal pregnancy, unspecified, third trimester",
        ),
        None => (
            "Z34.90",
            "Encounter for supervision of normal pregnancy, unspecified, unspecified trimester",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icd_types::ObstetricFinding;

    fn ob_findings(ob: ObstetricFinding) -> FindingSet {
        FindingSet {
            obstetric: Some(ob),
            ..Default::default()
        }
    }

    #[test]
    fn test_abstains_without_finding() {
        assert!(resolve(&FindingSet::default()).is_none());
        assert!(resolve(&ob_findings(ObstetricFinding::default())).is_none());
    }

    #[test]
    fn test_gestational_diabetes_control_split() {
        let resolution = resolve(&ob_findings(ObstetricFinding {
            pregnant: true,
            trimester: Some(Trimester::Third),
            condition: Some(ObstetricCondition::GestationalDiabetesInsulinControlled),
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "O24.414");
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_gestational_diabetes_unspecified_control_warns() {
        let resolution = resolve(&ob_findings(ObstetricFinding {
            pregnant: true,
            trimester: Some(Trimester::Second),
            condition: Some(ObstetricCondition::GestationalDiabetesUnspecifiedControl),
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "O24.419");
        assert!(!resolution.warnings.is_empty());
    }

    #[test]
    fn test_preeclampsia_trimester_split() {
        let resolution = resolve(&ob_findings(ObstetricFinding {
            pregnant: true,
            trimester: Some(Trimester::Third),
            condition: Some(ObstetricCondition::PreeclampsiaSevere),
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "O14.13");

        let resolution = resolve(&ob_findings(ObstetricFinding {
            pregnant: true,
            trimester: None,
            condition: Some(ObstetricCondition::PreeclampsiaMildModerate),
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "O14.00");
        assert!(resolution.warnings.iter().any(|w| w.contains("Trimester")));
    }

    #[test]
    fn test_uncomplicated_pregnancy_supervision() {
        let resolution = resolve(&ob_findings(ObstetricFinding {
            pregnant: true,
            trimester: Some(Trimester::First),
            condition: None,
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "Z34.91");
    }
}
