//! Cardiovascular domain resolver.
//!
//! Applies the hypertension combination-code hierarchy
//! (I13 over I12/I11 over I10) by checking compound conditions before
//! single ones, and maps heart failure through an explicit
//! type × acuity table.

use icd_types::{
    well_known, Acuity, CandidateCode, CkdStage, FindingSet, HeartFailureFinding,
    HeartFailureType, Resolution, SecondaryCode, SecondaryKind,
};

/// Resolves the cardiovascular finding bundle, if present.
pub fn resolve(findings: &FindingSet) -> Option<Resolution> {
    let cv = findings.cardiovascular.as_ref()?;
    let mut warnings = Vec::new();
    let mut secondary = Vec::new();

    // CKD stage for combination codes may come from either the renal
    // or the diabetes bundle.
    let ckd_stage = findings
        .renal
        .as_ref()
        .and_then(|r| r.ckd_stage)
        .or_else(|| findings.diabetes.as_ref().and_then(|dm| dm.ckd_stage));

    // Most specific combination first.
    let primary = if cv.hypertension && cv.heart_failure.is_some() && ckd_stage.is_some() {
        let stage = ckd_stage.unwrap_or(CkdStage::Stage1);
        let (icd_code, label) = if stage.is_stage5_or_esrd() {
            (
                well_known::HTN_HEART_AND_CKD_WITH_HF_STAGE_5,
                "Hypertensive heart and chronic kidney disease with heart failure and with stage 5 chronic kidney disease, or end stage renal disease",
            )
        } else {
            (
                well_known::HTN_HEART_AND_CKD_WITH_HF,
                "Hypertensive heart and chronic kidney disease with heart failure and stage 1 through stage 4 chronic kidney disease",
            )
        };
        push_heart_failure_companion(&mut secondary, cv.heart_failure, &mut warnings);
        push_ckd_companion(&mut secondary, stage);
        CandidateCode::new(icd_code, label, "cardiovascular", 0.9)
            .with_guideline_rule("Hypertension with heart failure and CKD codes to combination I13.-")
    } else if cv.hypertension && ckd_stage.is_some() {
        let stage = ckd_stage.unwrap_or(CkdStage::Stage1);
        let (icd_code, label) = if stage.is_stage5_or_esrd() {
            (
                well_known::HTN_CKD_STAGE_5,
                "Hypertensive chronic kidney disease with stage 5 chronic kidney disease or end stage renal disease",
            )
        } else {
            (
                well_known::HTN_CKD_STAGE_1_TO_4,
                "Hypertensive chronic kidney disease with stage 1 through stage 4 chronic kidney disease",
            )
        };
        push_ckd_companion(&mut secondary, stage);
        CandidateCode::new(icd_code, label, "cardiovascular", 0.85)
            .with_guideline_rule("Hypertension with CKD codes to combination I12.-")
    } else if cv.hypertension && cv.heart_failure.is_some() {
        push_heart_failure_companion(&mut secondary, cv.heart_failure, &mut warnings);
        CandidateCode::new(
            well_known::HTN_HEART_DISEASE_WITH_HF,
            "Hypertensive heart disease with heart failure",
            "cardiovascular",
            0.85,
        )
        .with_guideline_rule("Hypertension with heart failure codes to combination I11.0")
    } else if cv.hypertension {
        CandidateCode::new(
            well_known::ESSENTIAL_HYPERTENSION,
            "Essential (primary) hypertension",
            "cardiovascular",
            0.7,
        )
    } else if let Some(hf) = cv.heart_failure {
        let (icd_code, label) = heart_failure_code(hf, &mut warnings);
        CandidateCode::new(icd_code, label, "cardiovascular", 0.8)
    } else if cv.atrial_fibrillation {
        CandidateCode::new(
            well_known::ATRIAL_FIBRILLATION,
            "Unspecified atrial fibrillation",
            "cardiovascular",
            0.75,
        )
    } else if cv.coronary_artery_disease {
        CandidateCode::new(
            well_known::CAD_NATIVE_NO_ANGINA,
            "Atherosclerotic heart disease of native coronary artery without angina pectoris",
            "cardiovascular",
            0.75,
        )
    } else {
        return None;
    };

    // One primary per domain; note anything documented but not taken.
    if cv.atrial_fibrillation && primary.code != well_known::ATRIAL_FIBRILLATION {
        warnings.push(
            "Atrial fibrillation also documented; a more specific cardiovascular primary was selected"
                .to_string(),
        );
    }
    if cv.coronary_artery_disease && primary.code != well_known::CAD_NATIVE_NO_ANGINA {
        warnings.push(
            "Coronary artery disease also documented; a more specific cardiovascular primary was selected"
                .to_string(),
        );
    }

    Some(Resolution {
        primary,
        secondary,
        warnings,
    })
}

/// Adds the I50.x companion mandated by I11.0/I13.x.
fn push_heart_failure_companion(
    secondary: &mut Vec<SecondaryCode>,
    hf: Option<HeartFailureFinding>,
    warnings: &mut Vec<String>,
) {
    let hf = hf.unwrap_or_default();
    let (icd_code, label) = heart_failure_code(hf, warnings);
    secondary.push(SecondaryCode::new(
        CandidateCode::new(icd_code, label, "cardiovascular", 0.8)
            .with_guideline_rule("Use additional code to identify type of heart failure (I50.-)"),
        SecondaryKind::Manifestation,
    ));
}

/// Adds the N18.x companion mandated by I12.x/I13.x.
fn push_ckd_companion(secondary: &mut Vec<SecondaryCode>, stage: CkdStage) {
    secondary.push(SecondaryCode::new(
        CandidateCode::new(stage.n18_code(), stage.n18_label(), "cardiovascular", 0.8)
            .with_guideline_rule(
                "Use additional code to identify the stage of chronic kidney disease (N18.-)",
            ),
        SecondaryKind::Manifestation,
    ));
}

/// Heart failure type × acuity matrix (I50 family).
fn heart_failure_code(
    hf: HeartFailureFinding,
    warnings: &mut Vec<String>,
) -> (&'static str, &'static str) {
    use Acuity::*;
    use HeartFailureType::*;
    match (hf.hf_type, hf.acuity) {
        (Some(Systolic), Some(Acute)) => ("I50.21", "Acute systolic (congestive) heart failure"),
        (Some(Systolic), Some(Chronic)) => ("I50.22", "Chronic systolic (congestive) heart failure"),
        (Some(Systolic), Some(AcuteOnChronic)) => (
            "I50.23",
            "Acute on chronic systolic (congestive) heart failure",
        ),
        (Some(Systolic), None) => ("I50.20", "Unspecified systolic (congestive) heart failure"),
        (Some(Diastolic), Some(Acute)) => ("I50.31", "Acute diastolic (congestive) heart failure"),
        (Some(Diastolic), Some(Chronic)) => {
            ("I50.32", "Chronic diastolic (congestive) heart failure")
        }
        (Some(Diastolic), Some(AcuteOnChronic)) => (
            "I50.33",
            "Acute on chronic diastolic (congestive) heart failure",
        ),
        (Some(Diastolic), None) => ("I50.30", "Unspecified diastolic (congestive) heart failure"),
        (Some(Combined), Some(Acute)) => (
            "I50.41",
            "Acute combined systolic (congestive) and diastolic (congestive) heart failure",
        ),
        (Some(Combined), Some(Chronic)) => (
            "I50.42",
            "Chronic combined systolic (congestive) and diastolic (congestive) heart failure",
        ),
        (Some(Combined), Some(AcuteOnChronic)) => (
            "I50.43",
            "Acute on chronic combined systolic (congestive) and diastolic (congestive) heart failure",
        ),
        (Some(Combined), None) => (
            "I50.40",
            "Unspecified combined systolic (congestive) and diastolic (congestive) heart failure",
        ),
        (None, _) => {
            warnings.push("Heart failure type not documented".to_string());
            (well_known::HEART_FAILURE_UNSPECIFIED, "Heart failure, unspecified")
        }
    }
}
