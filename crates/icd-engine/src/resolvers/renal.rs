//! Renal domain resolver.
//!
//! Owns acute kidney injury, CKD staging, and dialysis status. Defers
//! CKD emission when the diabetes domain has already claimed it, since
//! the diabetes resolver emits the combination code and its N18.x
//! companion.

use icd_types::{
    well_known, CandidateCode, CkdStage, FindingSet, Resolution, SecondaryCode, SecondaryKind,
};

/// Resolves the renal finding bundle, if present.
pub fn resolve(findings: &FindingSet) -> Option<Resolution> {
    let renal = findings.renal.as_ref()?;
    let mut warnings = Vec::new();

    // Diabetic CKD is combined into the diabetes primary code.
    let diabetes_owns_ckd = findings
        .diabetes
        .as_ref()
        .map(|dm| dm.has_ckd())
        .unwrap_or(false);

    let primary = if renal.acute_kidney_injury {
        CandidateCode::new(
            well_known::AKI_UNSPECIFIED,
            "Acute kidney failure, unspecified",
            "renal",
            0.8,
        )
    } else if let Some(stage) = renal.ckd_stage.filter(|_| !diabetes_owns_ckd) {
        CandidateCode::new(stage.n18_code(), stage.n18_label(), "renal", 0.8)
    } else if renal.on_dialysis && !diabetes_owns_ckd {
        // Dialysis without a staged CKD finding implies end-stage
        // disease; say so rather than defaulting silently.
        warnings.push(
            "Dialysis dependence documented without CKD stage; coded as end stage renal disease"
                .to_string(),
        );
        CandidateCode::new(well_known::ESRD, CkdStage::EndStage.n18_label(), "renal", 0.6)
    } else {
        // Nothing left for this domain once diabetes claimed the CKD.
        return None;
    };

    let mut secondary = Vec::new();
    if renal.on_dialysis {
        secondary.push(SecondaryCode::new(
            CandidateCode::new(
                well_known::DIALYSIS_STATUS,
                "Dependence on renal dialysis",
                "renal",
                0.7,
            )
            .with_guideline_rule("Use additional code Z99.2 for dialysis status"),
            SecondaryKind::Outcome,
        ));
    }

    Some(Resolution {
        primary,
        secondary,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use icd_types::{DiabetesComplication, DiabetesFinding, RenalFinding};

    #[test]
    fn test_abstains_without_finding() {
        assert!(resolve(&FindingSet::default()).is_none());
    }

    #[test]
    fn test_ckd_stage_table() {
        let findings = FindingSet {
            renal: Some(RenalFinding {
                ckd_stage: Some(CkdStage::Stage3),
                ..Default::default()
            }),
            ..Default::default()
        };
        let resolution = resolve(&findings).unwrap();
        assert_eq!(resolution.primary.code, "N18.30");
    }

    #[test]
    fn test_aki_outranks_ckd() {
        let findings = FindingSet {
            renal: Some(RenalFinding {
                acute_kidney_injury: true,
                ckd_stage: Some(CkdStage::Stage2),
                ..Default::default()
            }),
            ..Default::default()
        };
        let resolution = resolve(&findings).unwrap();
        assert_eq!(resolution.primary.code, "N17.9");
    }

    #[test]
    fn test_defers_ckd_to_diabetes_domain() {
        let findings = FindingSet {
            diabetes: Some(DiabetesFinding {
                complications: vec![DiabetesComplication::ChronicKidneyDisease],
                ckd_stage: Some(CkdStage::Stage4),
                ..Default::default()
            }),
            renal: Some(RenalFinding {
                ckd_stage: Some(CkdStage::Stage4),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(resolve(&findings).is_none());
    }

    #[test]
    fn test_dialysis_status_companion() {
        let findings = FindingSet {
            renal: Some(RenalFinding {
                ckd_stage: Some(CkdStage::EndStage),
                on_dialysis: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let resolution = resolve(&findings).unwrap();
        assert_eq!(resolution.primary.code, "N18.6");
        assert_eq!(resolution.secondary[0].candidate.code, "Z99.2");
        assert_eq!(resolution.secondary[0].kind, SecondaryKind::Outcome);
    }

    #[test]
    fn test_dialysis_without_stage_warns() {
        let findings = FindingSet {
            renal: Some(RenalFinding {
                on_dialysis: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let resolution = resolve(&findings).unwrap();
        assert_eq!(resolution.primary.code, "N18.6");
        assert!(resolution.warnings[0].contains("without CKD stage"));
    }
}
