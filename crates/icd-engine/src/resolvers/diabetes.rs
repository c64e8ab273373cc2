//! Diabetes domain resolver.
//!
//! Selects one primary diabetes code from the E08–E13 family by
//! complication priority, then attaches the guideline-mandated
//! companions (CKD stage, foot-ulcer site, insulin use, adverse-effect
//! T-code for drug-induced diabetes).
//!
//! All suffix mappings are explicit lookup tables so each matrix cell
//! is independently testable.

use icd_types::{
    well_known, CandidateCode, DiabetesComplication, DiabetesFinding, DiabetesType, FindingSet,
    FootUlcerSite, Resolution, RetinopathySeverity, SecondaryCode, SecondaryKind, UlcerSeverity,
};

/// Resolves the diabetes finding bundle, if present.
pub fn resolve(findings: &FindingSet) -> Option<Resolution> {
    let dm = findings.diabetes.as_ref()?;
    let mut warnings = Vec::new();

    let dm_type = match dm.diabetes_type {
        Some(t) => t,
        None => {
            warnings.push(
                "Diabetes type not documented; coded as type 2 per default guideline".to_string(),
            );
            DiabetesType::Type2
        }
    };
    let family = dm_type.family_prefix();

    let complication = dm.primary_complication();
    let (suffix, complication_label) = complication_suffix(complication, dm, &mut warnings);
    let primary_code = format_code(family, suffix);
    let label = format!("{} {}", family_label(dm_type), complication_label);

    let base_score = if complication.is_some() { 0.85 } else { 0.7 };
    let mut primary = CandidateCode::new(primary_code, label, "diabetes", base_score);
    if let Some(c) = complication {
        primary = primary.with_rationale(format!(
            "highest-priority documented complication: {c:?}"
        ));
    }

    let mut secondary = Vec::new();

    // CKD stage companion ("code also N18.-").
    if complication == Some(DiabetesComplication::ChronicKidneyDisease) {
        match dm.ckd_stage {
            Some(stage) => secondary.push(SecondaryCode::new(
                CandidateCode::new(stage.n18_code(), stage.n18_label(), "diabetes", 0.8)
                    .with_guideline_rule("Code also chronic kidney disease (N18.-)"),
                SecondaryKind::Manifestation,
            )),
            None => warnings.push(
                "Diabetic CKD documented without a stage; code also N18.- when staged".to_string(),
            ),
        }
    }

    // Foot-ulcer site companion ("use additional code L97.-").
    if complication == Some(DiabetesComplication::FootUlcer) {
        let (ulcer_code, ulcer_label) = foot_ulcer_code(dm.ulcer_site, dm.ulcer_severity);
        if dm.ulcer_site.is_none() {
            warnings.push("Foot ulcer site not documented; coded as other part of foot".to_string());
        }
        if dm.ulcer_severity.is_none() {
            warnings.push("Foot ulcer severity not documented".to_string());
        }
        secondary.push(SecondaryCode::new(
            CandidateCode::new(ulcer_code, ulcer_label, "diabetes", 0.75)
                .with_guideline_rule("Use additional code to identify site of ulcer (L97.4-, L97.5-)"),
            SecondaryKind::Manifestation,
        ));
    }

    if complication == Some(DiabetesComplication::CharcotJoint) {
        warnings.push(
            "Charcot joint coded as diabetic arthropathy; M14.6- is mutually exclusive (Excludes1)"
                .to_string(),
        );
    }

    // Drug-induced diabetes carries the adverse-effect T-code.
    if dm_type == DiabetesType::DrugInduced {
        secondary.push(SecondaryCode::new(
            CandidateCode::new(
                well_known::ADVERSE_EFFECT_UNSPECIFIED_DRUG_INITIAL,
                "Adverse effect of unspecified drugs, medicaments and biological substances, initial encounter",
                "diabetes",
                0.6,
            )
            .with_guideline_rule("Use additional code for adverse effect to identify drug (T36-T50)"),
            SecondaryKind::ExternalCause,
        ));
    }

    // Long-term insulin use status (not reported for type 1, where
    // insulin is assumed).
    if dm.insulin_use && dm_type != DiabetesType::Type1 {
        secondary.push(SecondaryCode::new(
            CandidateCode::new("Z79.4", "Long term (current) use of insulin", "diabetes", 0.6)
                .with_guideline_rule("Use additional code Z79.4 for long-term insulin use"),
            SecondaryKind::Outcome,
        ));
    }

    Some(Resolution {
        primary,
        secondary,
        warnings,
    })
}

/// Returns the code suffix and label fragment for the selected
/// complication.
fn complication_suffix(
    complication: Option<DiabetesComplication>,
    dm: &DiabetesFinding,
    warnings: &mut Vec<String>,
) -> (&'static str, &'static str) {
    use DiabetesComplication::*;
    match complication {
        Some(Hyperosmolarity) => (".00", "with hyperosmolarity without coma"),
        Some(Ketoacidosis) => (".10", "with ketoacidosis without coma"),
        Some(Hypoglycemia) => (".649", "with hypoglycemia without coma"),
        Some(Hyperglycemia) => (".65", "with hyperglycemia"),
        Some(FootUlcer) => (".621", "with foot ulcer"),
        Some(Angiopathy) => (".51", "with diabetic peripheral angiopathy without gangrene"),
        Some(CharcotJoint) => (".610", "with diabetic neuropathic arthropathy"),
        Some(Retinopathy) => retinopathy_suffix(dm, warnings),
        Some(Nephropathy) => (".21", "with diabetic nephropathy"),
        Some(ChronicKidneyDisease) => (".22", "with diabetic chronic kidney disease"),
        Some(Neuropathy) => (".40", "with diabetic neuropathy, unspecified"),
        Some(Cataract) => (".36", "with diabetic cataract"),
        None => (".9", "without complications"),
    }
}

/// Retinopathy severity × macular-edema matrix.
fn retinopathy_suffix(
    dm: &DiabetesFinding,
    warnings: &mut Vec<String>,
) -> (&'static str, &'static str) {
    use RetinopathySeverity::*;
    let severity = dm.retinopathy_severity.unwrap_or_else(|| {
        warnings.push("Retinopathy severity not documented".to_string());
        Unspecified
    });
    match (severity, dm.macular_edema) {
        (Unspecified, true) => (".311", "with unspecified diabetic retinopathy with macular edema"),
        (Unspecified, false) => (
            ".319",
            "with unspecified diabetic retinopathy without macular edema",
        ),
        (Mild, true) => (
            ".321",
            "with mild nonproliferative diabetic retinopathy with macular edema",
        ),
        (Mild, false) => (
            ".329",
            "with mild nonproliferative diabetic retinopathy without macular edema",
        ),
        (Moderate, true) => (
            ".331",
            "with moderate nonproliferative diabetic retinopathy with macular edema",
        ),
        (Moderate, false) => (
            ".339",
            "with moderate nonproliferative diabetic retinopathy without macular edema",
        ),
        (Severe, true) => (
            ".341",
            "with severe nonproliferative diabetic retinopathy with macular edema",
        ),
        (Severe, false) => (
            ".349",
            "with severe nonproliferative diabetic retinopathy without macular edema",
        ),
        (Proliferative, true) => (
            ".351",
            "with proliferative diabetic retinopathy with macular edema",
        ),
        (Proliferative, false) => (
            ".359",
            "with proliferative diabetic retinopathy without macular edema",
        ),
    }
}

/// Foot-ulcer site × severity matrix (L97 family).
fn foot_ulcer_code(
    site: Option<FootUlcerSite>,
    severity: Option<UlcerSeverity>,
) -> (&'static str, &'static str) {
    use FootUlcerSite::*;
    use UlcerSeverity::*;
    match (site.unwrap_or(OtherPartOfFoot), severity) {
        (HeelMidfoot, Some(SkinBreakdown)) => (
            "L97.401",
            "Non-pressure chronic ulcer of unspecified heel and midfoot limited to breakdown of skin",
        ),
        (HeelMidfoot, Some(FatLayerExposed)) => (
            "L97.402",
            "Non-pressure chronic ulcer of unspecified heel and midfoot with fat layer exposed",
        ),
        (HeelMidfoot, Some(MuscleNecrosis)) => (
            "L97.403",
            "Non-pressure chronic ulcer of unspecified heel and midfoot with necrosis of muscle",
        ),
        (HeelMidfoot, Some(BoneNecrosis)) => (
            "L97.404",
            "Non-pressure chronic ulcer of unspecified heel and midfoot with necrosis of bone",
        ),
        (HeelMidfoot, None) => (
            "L97.409",
            "Non-pressure chronic ulcer of unspecified heel and midfoot with unspecified severity",
        ),
        (OtherPartOfFoot, Some(SkinBreakdown)) => (
            "L97.501",
            "Non-pressure chronic ulcer of other part of unspecified foot limited to breakdown of skin",
        ),
        (OtherPartOfFoot, Some(FatLayerExposed)) => (
            "L97.502",
            "Non-pressure chronic ulcer of other part of unspecified foot with fat layer exposed",
        ),
        (OtherPartOfFoot, Some(MuscleNecrosis)) => (
            "L97.503",
            "Non-pressure chronic ulcer of other part of unspecified foot with necrosis of muscle",
        ),
        (OtherPartOfFoot, Some(BoneNecrosis)) => (
            "L97.504",
            "Non-pressure chronic ulcer of other part of unspecified foot with necrosis of bone",
        ),
        (OtherPartOfFoot, None) => (
            "L97.509",
            "Non-pressure chronic ulcer of other part of unspecified foot with unspecified severity",
        ),
    }
}

/// Joins a family prefix and decimal suffix.
fn format_code(family: &str, suffix: &str) -> String {
    let mut icd_code = String::with_capacity(family.len() + suffix.len());
    icd_code.push_str(family);
    icd_code.push_str(suffix);
    icd_code
}

/// Display label for the diabetes type.
fn family_label(dm_type: DiabetesType) -> &'static str {
    match dm_type {
        DiabetesType::SecondaryToCondition => "Diabetes mellitus due to underlying condition",
        DiabetesType::DrugInduced => "Drug or chemical induced diabetes mellitus",
        DiabetesType::Type1 => "Type 1 diabetes mellitus",
        DiabetesType::Type2 => "Type 2 diabetes mellitus",
        DiabetesType::OtherSpecified => "Other specified diabetes mellitus",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icd_types::CkdStage;

    fn base_finding(dm_type: DiabetesType) -> DiabetesFinding {
        DiabetesFinding {
            diabetes_type: Some(dm_type),
            ..Default::default()
        }
    }

    fn resolve_dm(dm: DiabetesFinding) -> Resolution {
        resolve(&FindingSet {
            diabetes: Some(dm),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_abstains_without_finding() {
        assert!(resolve(&FindingSet::default()).is_none());
    }

    #[test]
    fn test_uncomplicated_type2() {
        let resolution = resolve_dm(base_finding(DiabetesType::Type2));
        assert_eq!(resolution.primary.code, "E11.9");
        assert!(resolution.secondary.is_empty());
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_undocumented_type_defaults_with_warning() {
        let resolution = resolve_dm(DiabetesFinding::default());
        assert_eq!(resolution.primary.code, "E11.9");
        assert_eq!(resolution.warnings.len(), 1);
        assert!(resolution.warnings[0].contains("type not documented"));
    }

    #[test]
    fn test_ckd_with_stage_emits_companion() {
        let resolution = resolve_dm(DiabetesFinding {
            complications: vec![DiabetesComplication::ChronicKidneyDisease],
            ckd_stage: Some(CkdStage::Stage4),
            ..base_finding(DiabetesType::Type2)
        });
        assert_eq!(resolution.primary.code, "E11.22");
        assert_eq!(resolution.secondary.len(), 1);
        assert_eq!(resolution.secondary[0].candidate.code, "N18.4");
        assert_eq!(resolution.secondary[0].kind, SecondaryKind::Manifestation);
    }

    #[test]
    fn test_ckd_without_stage_warns_instead_of_guessing() {
        let resolution = resolve_dm(DiabetesFinding {
            complications: vec![DiabetesComplication::ChronicKidneyDisease],
            ..base_finding(DiabetesType::Type2)
        });
        assert_eq!(resolution.primary.code, "E11.22");
        assert!(resolution.secondary.is_empty());
        assert!(resolution.warnings.iter().any(|w| w.contains("N18.-")));
    }

    #[test]
    fn test_complication_priority_selects_primary() {
        // Ketoacidosis outranks neuropathy and retinopathy.
        let resolution = resolve_dm(DiabetesFinding {
            complications: vec![
                DiabetesComplication::Neuropathy,
                DiabetesComplication::Ketoacidosis,
                DiabetesComplication::Retinopathy,
            ],
            ..base_finding(DiabetesType::Type1)
        });
        assert_eq!(resolution.primary.code, "E10.10");
    }

    #[test]
    fn test_charcot_warning_and_code() {
        let resolution = resolve_dm(DiabetesFinding {
            complications: vec![DiabetesComplication::CharcotJoint],
            ..base_finding(DiabetesType::Type2)
        });
        assert_eq!(resolution.primary.code, "E11.610");
        assert!(resolution.warnings.iter().any(|w| w.contains("Charcot")));
    }

    #[test]
    fn test_drug_induced_hyperglycemia_carries_t_code() {
        let resolution = resolve_dm(DiabetesFinding {
            complications: vec![DiabetesComplication::Hyperglycemia],
            ..base_finding(DiabetesType::DrugInduced)
        });
        assert_eq!(resolution.primary.code, "E09.65");
        let t_code = resolution
            .secondary
            .iter()
            .find(|s| s.kind == SecondaryKind::ExternalCause)
            .unwrap();
        assert_eq!(t_code.candidate.code, "T50.905A");
    }

    #[test]
    fn test_retinopathy_matrix() {
        let resolution = resolve_dm(DiabetesFinding {
            complications: vec![DiabetesComplication::Retinopathy],
            retinopathy_severity: Some(RetinopathySeverity::Proliferative),
            macular_edema: true,
            ..base_finding(DiabetesType::Type2)
        });
        assert_eq!(resolution.primary.code, "E11.351");

        let resolution = resolve_dm(DiabetesFinding {
            complications: vec![DiabetesComplication::Retinopathy],
            retinopathy_severity: Some(RetinopathySeverity::Mild),
            macular_edema: false,
            ..base_finding(DiabetesType::Type1)
        });
        assert_eq!(resolution.primary.code, "E10.329");
    }

    #[test]
    fn test_retinopathy_unspecified_severity_warns() {
        let resolution = resolve_dm(DiabetesFinding {
            complications: vec![DiabetesComplication::Retinopathy],
            ..base_finding(DiabetesType::Type2)
        });
        assert_eq!(resolution.primary.code, "E11.319");
        assert!(resolution
            .warnings
            .iter()
            .any(|w| w.contains("severity not documented")));
    }

    #[test]
    fn test_foot_ulcer_matrix() {
        let resolution = resolve_dm(DiabetesFinding {
            complications: vec![DiabetesComplication::FootUlcer],
            ulcer_site: Some(FootUlcerSite::HeelMidfoot),
            ulcer_severity: Some(UlcerSeverity::FatLayerExposed),
            ..base_finding(DiabetesType::Type2)
        });
        assert_eq!(resolution.primary.code, "E11.621");
        assert_eq!(resolution.secondary[0].candidate.code, "L97.402");
    }

    #[test]
    fn test_insulin_use_status_code() {
        let resolution = resolve_dm(DiabetesFinding {
            insulin_use: true,
            ..base_finding(DiabetesType::Type2)
        });
        assert!(resolution
            .secondary
            .iter()
            .any(|s| s.candidate.code == "Z79.4"));

        // Not reported for type 1.
        let resolution = resolve_dm(DiabetesFinding {
            insulin_use: true,
            ..base_finding(DiabetesType::Type1)
        });
        assert!(resolution.secondary.is_empty());
    }
}
