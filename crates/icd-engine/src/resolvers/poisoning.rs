//! Poisoning / adverse-effect domain resolver.
//!
//! T-codes are built from the substance stem, the intent digit, and
//! the encounter 7th character. Whether the T-code leads or follows
//! the manifestation codes is decided by the sequencing engine from
//! the intent; this resolver only builds the code.

use icd_types::{
    CandidateCode, EncounterType, FindingSet, Intent, Resolution, SubstanceClass,
};

/// Resolves the poisoning finding bundle, if present.
pub fn resolve(findings: &FindingSet) -> Option<Resolution> {
    let poisoning = findings.poisoning.as_ref()?;
    let mut warnings = Vec::new();

    let substance = match poisoning.substance {
        Some(substance) => substance,
        None => {
            warnings.push(
                "Substance not documented; coded as unspecified drug or biological substance"
                    .to_string(),
            );
            SubstanceClass::UnspecifiedDrug
        }
    };

    let seventh = match poisoning.encounter {
        Some(e) => e.seventh_character(),
        None => {
            warnings.push(
                "Encounter type not documented; defaulted to initial encounter (A)".to_string(),
            );
            EncounterType::Initial.seventh_character()
        }
    };

    let (stem, substance_label) = substance_stem(substance);
    let code = format!("{stem}{}{seventh}", poisoning.intent.t_code_digit());
    let label = intent_label(poisoning.intent, substance_label);
    let rule = if poisoning.intent.is_poisoning() {
        "Poisoning: the T-code is sequenced before the manifestations"
    } else {
        "Adverse effect or underdosing: the manifestation is sequenced before the T-code"
    };

    Some(Resolution {
        primary: CandidateCode::new(code, label, "poisoning", 0.85).with_guideline_rule(rule),
        secondary: Vec::new(),
        warnings,
    })
}

/// Substance → T-code stem table; the stem ends where the intent digit
/// goes.
fn substance_stem(substance: SubstanceClass) -> (&'static str, &'static str) {
    use SubstanceClass::*;
    match substance {
        UnspecifiedDrug => (
            "T50.90",
            "unspecified drugs, medicaments and biological substances",
        ),
        Opioid => ("T40.2X", "other opioids"),
        Benzodiazepine => ("T42.4X", "benzodiazepines"),
        Anticoagulant => ("T45.51", "anticoagulants"),
        Penicillin => ("T36.0X", "penicillins"),
    }
}

/// Composes the code label for an intent and substance.
fn intent_label(intent: Intent, substance_label: &str) -> String {
    use Intent::*;
    match intent {
        Accidental => format!("Poisoning by {substance_label}, accidental (unintentional)"),
        IntentionalSelfHarm => format!("Poisoning by {substance_label}, intentional self-harm"),
        Assault => format!("Poisoning by {substance_label}, assault"),
        Undetermined => format!("Poisoning by {substance_label}, undetermined"),
        AdverseEffect => format!("Adverse effect of {substance_label}"),
        Underdosing => format!("Underdosing of {substance_label}"),
    }
}
