//! Well-known ICD-10-CM codes.
//!
//! This module provides constants for the codes the rules engine emits
//! directly, grouped by guideline role. Resolver lookup tables reference
//! these constants so every emitted code has a single named source.
//!
//! # Examples
//!
//! ```
//! use icd_types::well_known;
//!
//! assert_eq!(well_known::SEPSIS_UNSPECIFIED, "A41.9");
//! assert_eq!(well_known::SEPTIC_SHOCK, "R65.21");
//! ```

// =============================================================================
// Systemic infection
// =============================================================================

/// Sepsis, unspecified organism.
pub const SEPSIS_UNSPECIFIED: &str = "A41.9";

/// Severe sepsis without septic shock.
pub const SEVERE_SEPSIS: &str = "R65.20";

/// Severe sepsis with septic shock.
pub const SEPTIC_SHOCK: &str = "R65.21";

/// Urinary tract infection, site not specified (urosepsis source).
pub const UTI_SITE_UNSPECIFIED: &str = "N39.0";

/// Infection following a procedure, initial encounter.
pub const POSTPROCEDURAL_INFECTION_INITIAL: &str = "T81.44XA";

// =============================================================================
// Diabetes mellitus
// =============================================================================

/// Type 2 diabetes mellitus with diabetic chronic kidney disease.
pub const T2DM_WITH_CKD: &str = "E11.22";

/// Type 2 diabetes mellitus with other diabetic arthropathy
/// (Charcot joint).
pub const T2DM_CHARCOT: &str = "E11.610";

/// Drug or chemical induced diabetes mellitus with hyperglycemia.
pub const DRUG_INDUCED_DM_HYPERGLYCEMIA: &str = "E09.65";

/// Type 2 diabetes mellitus without complications.
pub const T2DM_UNCOMPLICATED: &str = "E11.9";

// =============================================================================
// Renal
// =============================================================================

/// Acute kidney failure, unspecified.
pub const AKI_UNSPECIFIED: &str = "N17.9";

/// End stage renal disease.
pub const ESRD: &str = "N18.6";

/// Dependence on renal dialysis.
pub const DIALYSIS_STATUS: &str = "Z99.2";

// =============================================================================
// Cardiovascular
// =============================================================================

/// Essential (primary) hypertension.
pub const ESSENTIAL_HYPERTENSION: &str = "I10";

/// Hypertensive heart disease with heart failure.
pub const HTN_HEART_DISEASE_WITH_HF: &str = "I11.0";

/// Hypertensive CKD with stage 1-4 CKD.
pub const HTN_CKD_STAGE_1_TO_4: &str = "I12.9";

/// Hypertensive CKD with stage 5 CKD or ESRD.
pub const HTN_CKD_STAGE_5: &str = "I12.0";

/// Hypertensive heart and CKD with heart failure and stage 1-4 CKD.
pub const HTN_HEART_AND_CKD_WITH_HF: &str = "I13.0";

/// Hypertensive heart and CKD with heart failure and stage 5 CKD/ESRD.
pub const HTN_HEART_AND_CKD_WITH_HF_STAGE_5: &str = "I13.2";

/// Heart failure, unspecified.
pub const HEART_FAILURE_UNSPECIFIED: &str = "I50.9";

/// Unspecified atrial fibrillation.
pub const ATRIAL_FIBRILLATION: &str = "I48.91";

/// Atherosclerotic heart disease of native coronary artery without
/// angina pectoris.
pub const CAD_NATIVE_NO_ANGINA: &str = "I25.10";

// =============================================================================
// Respiratory
// =============================================================================

/// COPD with acute lower respiratory infection.
pub const COPD_WITH_LRI: &str = "J44.0";

/// COPD with acute exacerbation.
pub const COPD_WITH_EXACERBATION: &str = "J44.1";

/// COPD, unspecified.
pub const COPD_UNSPECIFIED: &str = "J44.9";

/// Pneumonia, unspecified organism.
pub const PNEUMONIA_UNSPECIFIED: &str = "J18.9";

// =============================================================================
// Gastrointestinal
// =============================================================================

/// Gastrointestinal hemorrhage, unspecified.
pub const GI_HEMORRHAGE: &str = "K92.2";

// =============================================================================
// Pain
// =============================================================================

/// Acute pain due to trauma.
pub const ACUTE_POST_TRAUMA_PAIN: &str = "G89.11";

/// Chronic pain due to trauma.
pub const CHRONIC_POST_TRAUMA_PAIN: &str = "G89.21";

// =============================================================================
// Poisoning / adverse effect
// =============================================================================

/// Adverse effect of unspecified drugs, medicaments and biological
/// substances, initial encounter.
pub const ADVERSE_EFFECT_UNSPECIFIED_DRUG_INITIAL: &str = "T50.905A";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code;

    #[test]
    fn test_constants_match_expected_codes() {
        assert_eq!(SEPSIS_UNSPECIFIED, "A41.9");
        assert_eq!(SEPTIC_SHOCK, "R65.21");
        assert_eq!(UTI_SITE_UNSPECIFIED, "N39.0");
        assert_eq!(T2DM_WITH_CKD, "E11.22");
        assert_eq!(DRUG_INDUCED_DM_HYPERGLYCEMIA, "E09.65");
        assert_eq!(ADVERSE_EFFECT_UNSPECIFIED_DRUG_INITIAL, "T50.905A");
    }

    #[test]
    fn test_family_predicates_agree() {
        assert!(code::is_sepsis_code(SEPSIS_UNSPECIFIED));
        assert!(code::is_diabetes_family(T2DM_WITH_CKD));
        assert!(code::is_diabetes_family(DRUG_INDUCED_DM_HYPERGLYCEMIA));
        assert!(!code::is_external_cause(ADVERSE_EFFECT_UNSPECIFIED_DRUG_INITIAL));
    }
}
