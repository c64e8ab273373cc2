//! Trauma domain resolver.
//!
//! Injury codes are built from a kind × site stem table plus the
//! laterality digit and the encounter 7th character; a missing 7th
//! character defaults to initial encounter with a warning. External
//! cause and post-traumatic pain are emitted as tagged secondaries so
//! the sequencing engine can place them.

use icd_types::{
    well_known, Acuity, CandidateCode, EncounterType, ExternalCauseMechanism, FindingSet,
    InjuryFinding, InjuryKind, InjurySite, Laterality, Resolution, SecondaryCode, SecondaryKind,
};

/// Resolves the trauma finding bundle, if present.
pub fn resolve(findings: &FindingSet) -> Option<Resolution> {
    let trauma = findings.trauma.as_ref()?;
    let mut warnings = Vec::new();
    let mut secondary = Vec::new();

    // The 7th character applies to the injury and external cause
    // codes; a pain-only bundle never needs it.
    let needs_seventh = trauma.injury.is_some() || trauma.external_cause.is_some();
    let seventh = if needs_seventh {
        seventh_character(trauma.injury.and_then(|i| i.encounter), &mut warnings)
    } else {
        'A'
    };

    let primary = match trauma.injury {
        Some(injury) => {
            let (stem, label) = injury_stem(injury, &mut warnings);
            CandidateCode::new(format!("{stem}{seventh}"), label, "trauma", 0.85)
        }
        None if trauma.post_traumatic_pain => {
            // Pain without a codable injury stands on its own.
            let (icd_code, label) = pain_code(trauma.pain_acuity, &mut warnings);
            CandidateCode::new(icd_code, label, "trauma", 0.7)
        }
        None => return None,
    };

    if trauma.injury.is_some() && trauma.post_traumatic_pain {
        let (icd_code, label) = pain_code(trauma.pain_acuity, &mut warnings);
        secondary.push(SecondaryCode::new(
            CandidateCode::new(icd_code, label, "trauma", 0.75)
                .with_guideline_rule("Post-traumatic pain is reported after the injury it follows"),
            SecondaryKind::Pain,
        ));
    }

    if let Some(mechanism) = trauma.external_cause {
        let (stem, label) = external_cause_stem(mechanism);
        secondary.push(SecondaryCode::new(
            CandidateCode::new(format!("{stem}{seventh}"), label, "trauma", 0.7)
                .with_guideline_rule("External cause codes are reported last"),
            SecondaryKind::ExternalCause,
        ));
    }

    Some(Resolution {
        primary,
        secondary,
        warnings,
    })
}

/// Resolves the 7th character, defaulting to initial encounter.
fn seventh_character(encounter: Option<EncounterType>, warnings: &mut Vec<String>) -> char {
    match encounter {
        Some(e) => e.seventh_character(),
        None => {
            warnings.push(
                "Encounter type not documented; defaulted to initial encounter (A)".to_string(),
            );
            EncounterType::Initial.seventh_character()
        }
    }
}

/// Laterality digit in the right/left/unspecified position families.
///
/// The S-chapter uses 1/2 for right/left; the unspecified digit varies
/// by family, so the caller passes it in.
fn laterality_digit(
    laterality: Option<Laterality>,
    unspecified: char,
    warnings: &mut Vec<String>,
) -> char {
    match laterality {
        Some(Laterality::Right) => '1',
        Some(Laterality::Left) => '2',
        Some(Laterality::Bilateral) | None => {
            if laterality.is_none() {
                warnings.push(
                    "Laterality not documented for a lateralizable injury site".to_string(),
                );
            }
            unspecified
        }
    }
}

/// Builds the pre-7th-character code stem for an injury.
fn injury_stem(injury: InjuryFinding, warnings: &mut Vec<String>) -> (String, String) {
    use InjuryKind::*;
    use InjurySite::*;

    // Head codes carry no laterality; every other site does.
    if injury.site == Head {
        let (stem, label) = match injury.kind {
            Fracture => ("S02.91X", "Unspecified fracture of skull"),
            Laceration => ("S01.91X", "Laceration without foreign body of unspecified part of head"),
            Contusion => ("S00.93X", "Contusion of unspecified part of head"),
        };
        return (stem.to_string(), label.to_string());
    }

    let side = match injury.laterality {
        Some(Laterality::Right) => "right",
        Some(Laterality::Left) => "left",
        _ => "unspecified",
    };

    // Family stem plus the digit the family uses for "unspecified
    // side", plus whether an X placeholder pads to the 7th position.
    let (family, unspecified, pad_x, kind_label) = match (injury.kind, injury.site) {
        (Fracture, UpperArm) => ("S42.30", '9', false, "Unspecified fracture of shaft of humerus"),
        (Fracture, Forearm) => ("S52.90", '9', false, "Unspecified fracture of forearm"),
        (Fracture, Wrist) => ("S62.9", '0', true, "Unspecified fracture of wrist and hand"),
        (Fracture, Femur) => ("S72.9", '0', true, "Unspecified fracture of femur"),
        (Fracture, LowerLeg) => ("S82.90", '9', false, "Unspecified fracture of lower leg"),
        (Laceration, UpperArm) => ("S41.11", '9', false, "Laceration without foreign body of upper arm"),
        (Laceration, Forearm) => ("S51.81", '9', false, "Laceration without foreign body of forearm"),
        (Laceration, Wrist) => ("S61.51", '9', false, "Laceration without foreign body of wrist"),
        (Laceration, Femur) => ("S71.11", '9', false, "Laceration without foreign body of thigh"),
        (Laceration, LowerLeg) => ("S81.81", '9', false, "Laceration without foreign body of lower leg"),
        (Contusion, UpperArm) => ("S40.02", '9', false, "Contusion of upper arm"),
        (Contusion, Forearm) => ("S50.1", '0', true, "Contusion of forearm"),
        (Contusion, Wrist) => ("S60.21", '9', false, "Contusion of wrist"),
        (Contusion, Femur) => ("S70.1", '0', true, "Contusion of thigh"),
        (Contusion, LowerLeg) => ("S80.1", '0', true, "Contusion of lower leg"),
        (_, Head) => unreachable!("head handled above"),
    };
    let digit = laterality_digit(injury.laterality, unspecified, warnings);
    let stem = if pad_x {
        format!("{family}{digit}X")
    } else {
        format!("{family}{digit}")
    };
    (stem, format!("{kind_label}, {side}"))
}

/// Mechanism → external cause stem table (V/W chapters).
fn external_cause_stem(mechanism: ExternalCauseMechanism) -> (&'static str, &'static str) {
    use ExternalCauseMechanism::*;
    match mechanism {
        Fall => ("W19.XXX", "Unspecified fall"),
        MotorVehicleAccident => (
            "V89.2XX",
            "Person injured in unspecified motor-vehicle accident, traffic",
        ),
        StruckByObject => ("W22.8XX", "Striking against or struck by other objects"),
    }
}

/// Post-traumatic pain chronicity table (G89).
fn pain_code(acuity: Option<Acuity>, warnings: &mut Vec<String>) -> (&'static str, &'static str) {
    match acuity {
        Some(Acuity::Chronic) => (
            well_known::CHRONIC_POST_TRAUMA_PAIN,
            "Chronic pain due to trauma",
        ),
        Some(_) => (well_known::ACUTE_POST_TRAUMA_PAIN, "Acute pain due to trauma"),
        None => {
            warnings.push(
                "Post-traumatic pain chronicity not documented; coded as acute".to_string(),
            );
            (well_known::ACUTE_POST_TRAUMA_PAIN, "Acute pain due to trauma")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icd_types::TraumaFinding;

    fn trauma_findings(trauma: TraumaFinding) -> FindingSet {
        FindingSet {
            trauma: Some(trauma),
            ..Default::default()
        }
    }

    #[test]
    fn test_abstains_without_finding() {
        assert!(resolve(&FindingSet::default()).is_none());
        assert!(resolve(&trauma_findings(TraumaFinding::default())).is_none());
    }

    #[test]
    fn test_femur_fracture_with_laterality_and_encounter() {
        let resolution = resolve(&trauma_findings(TraumaFinding {
            injury: Some(InjuryFinding {
                kind: InjuryKind::Fracture,
                site: InjurySite::Femur,
                laterality: Some(Laterality::Right),
                encounter: Some(EncounterType::Initial),
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "S72.91XA");
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_missing_seventh_character_defaults_to_initial() {
        let resolution = resolve(&trauma_findings(TraumaFinding {
            injury: Some(InjuryFinding {
                kind: InjuryKind::Laceration,
                site: InjurySite::Forearm,
                laterality: Some(Laterality::Left),
                encounter: None,
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "S51.812A");
        assert!(resolution
            .warnings
            .iter()
            .any(|w| w.contains("initial encounter")));
    }

    #[test]
    fn test_missing_laterality_warns() {
        let resolution = resolve(&trauma_findings(TraumaFinding {
            injury: Some(InjuryFinding {
                kind: InjuryKind::Contusion,
                site: InjurySite::Wrist,
                laterality: None,
                encounter: Some(EncounterType::Subsequent),
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "S60.219D");
        assert!(resolution.warnings.iter().any(|w| w.contains("Laterality")));
    }

    #[test]
    fn test_external_cause_and_pain_secondaries() {
        let resolution = resolve(&trauma_findings(TraumaFinding {
            injury: Some(InjuryFinding {
                kind: InjuryKind::Fracture,
                site: InjurySite::LowerLeg,
                laterality: Some(Laterality::Left),
                encounter: Some(EncounterType::Initial),
            }),
            external_cause: Some(ExternalCauseMechanism::Fall),
            post_traumatic_pain: true,
            pain_acuity: Some(Acuity::Acute),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "S82.902A");
        let codes: Vec<&str> = resolution
            .secondary
            .iter()
            .map(|s| s.candidate.code.as_str())
            .collect();
        assert_eq!(codes, vec!["G89.11", "W19.XXXA"]);
        assert_eq!(resolution.secondary[0].kind, SecondaryKind::Pain);
        assert_eq!(resolution.secondary[1].kind, SecondaryKind::ExternalCause);
    }

    #[test]
    fn test_pain_without_injury_is_primary() {
        let resolution = resolve(&trauma_findings(TraumaFinding {
            post_traumatic_pain: true,
            pain_acuity: Some(Acuity::Chronic),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "G89.21");
    }

    #[test]
    fn test_head_injury_has_no_laterality_digit() {
        let resolution = resolve(&trauma_findings(TraumaFinding {
            injury: Some(InjuryFinding {
                kind: InjuryKind::Contusion,
                site: InjurySite::Head,
                laterality: None,
                encounter: Some(EncounterType::Initial),
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "S00.93XA");
        // No laterality warning for a non-lateralizable site.
        assert!(!resolution.warnings.iter().any(|w| w.contains("Laterality")));
    }
}
