//! Infection domain resolver.
//!
//! Sepsis coding: organism selects the A40/A41 primary, severe sepsis
//! and septic shock add R65.2x, the anatomic source adds its own code,
//! and post-procedural sepsis adds the T81.44 code that the sequencing
//! engine will move ahead of the systemic infection.

use icd_types::{
    well_known, CandidateCode, FindingSet, InfectionSource, Organism, Resolution, SecondaryCode,
    SecondaryKind,
};

/// Resolves the infection finding bundle, if present.
pub fn resolve(findings: &FindingSet) -> Option<Resolution> {
    let infection = findings.infection.as_ref()?;
    if !infection.sepsis && !infection.severe_sepsis && !infection.septic_shock {
        return None;
    }
    let mut warnings = Vec::new();
    let mut secondary = Vec::new();

    let (sepsis_code, sepsis_label) = sepsis_code_for_organism(infection.organism);
    if infection.organism.is_none() {
        warnings.push("Sepsis organism not identified; coded as unspecified organism".to_string());
    }
    let primary = CandidateCode::new(sepsis_code, sepsis_label, "infection", 0.85)
        .with_guideline_rule("Code first the underlying systemic infection");

    if infection.post_procedural {
        secondary.push(SecondaryCode::new(
            CandidateCode::new(
                well_known::POSTPROCEDURAL_INFECTION_INITIAL,
                "Sepsis following a procedure, initial encounter",
                "infection",
                0.8,
            )
            .with_guideline_rule("Post-procedural sepsis: code first the complication (T81.44-)"),
            SecondaryKind::Source,
        ));
    }

    if infection.septic_shock {
        secondary.push(SecondaryCode::new(
            CandidateCode::new(
                well_known::SEPTIC_SHOCK,
                "Severe sepsis with septic shock",
                "infection",
                0.85,
            )
            .with_guideline_rule("Code first underlying infection"),
            SecondaryKind::Shock,
        ));
    } else if infection.severe_sepsis {
        secondary.push(SecondaryCode::new(
            CandidateCode::new(
                well_known::SEVERE_SEPSIS,
                "Severe sepsis without septic shock",
                "infection",
                0.85,
            )
            .with_guideline_rule("Code first underlying infection"),
            SecondaryKind::Shock,
        ));
    }

    if let Some(source) = infection.source {
        let (source_code, source_label) = source_code(source);
        secondary.push(SecondaryCode::new(
            CandidateCode::new(source_code, source_label, "infection", 0.8),
            SecondaryKind::Source,
        ));
    }

    Some(Resolution {
        primary,
        secondary,
        warnings,
    })
}

/// Organism → systemic infection code table (A40/A41 families).
fn sepsis_code_for_organism(organism: Option<Organism>) -> (&'static str, &'static str) {
    use Organism::*;
    match organism {
        Some(StaphAureus) => (
            "A41.01",
            "Sepsis due to Methicillin susceptible Staphylococcus aureus",
        ),
        Some(Mrsa) => (
            "A41.02",
            "Sepsis due to Methicillin resistant Staphylococcus aureus",
        ),
        Some(GroupAStrep) => ("A40.0", "Sepsis due to streptococcus, group A"),
        Some(GroupBStrep) => ("A40.1", "Sepsis due to streptococcus, group B"),
        Some(Pneumococcus) => ("A40.3", "Sepsis due to Streptococcus pneumoniae"),
        Some(EColi) => ("A41.51", "Sepsis due to Escherichia coli [E. coli]"),
        Some(Pseudomonas) => ("A41.52", "Sepsis due to Pseudomonas"),
        Some(Klebsiella) => ("A41.59", "Other Gram-negative sepsis"),
        None => (well_known::SEPSIS_UNSPECIFIED, "Sepsis, unspecified organism"),
    }
}

/// Infection source → localized infection code table.
fn source_code(source: InfectionSource) -> (&'static str, &'static str) {
    match source {
        InfectionSource::Urinary => (
            well_known::UTI_SITE_UNSPECIFIED,
            "Urinary tract infection, site not specified",
        ),
        InfectionSource::Pneumonia => (
            well_known::PNEUMONIA_UNSPECIFIED,
            "Pneumonia, unspecified organism",
        ),
        InfectionSource::Cellulitis => ("L03.90", "Cellulitis, unspecified"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icd_types::InfectionFinding;

    fn infection_findings(infection: InfectionFinding) -> FindingSet {
        FindingSet {
            infection: Some(infection),
            ..Default::default()
        }
    }

    #[test]
    fn test_abstains_without_sepsis() {
        assert!(resolve(&FindingSet::default()).is_none());
        // Organism alone, no sepsis documented.
        let findings = infection_findings(InfectionFinding {
            organism: Some(Organism::EColi),
            ..Default::default()
        });
        assert!(resolve(&findings).is_none());
    }

    #[test]
    fn test_urosepsis_with_shock() {
        let resolution = resolve(&infection_findings(InfectionFinding {
            sepsis: true,
            septic_shock: true,
            source: Some(InfectionSource::Urinary),
            ..Default::default()
        }))
        .unwrap();

        assert_eq!(resolution.primary.code, "A41.9");
        let codes: Vec<&str> = resolution
            .secondary
            .iter()
            .map(|s| s.candidate.code.as_str())
            .collect();
        assert_eq!(codes, vec!["R65.21", "N39.0"]);
        assert_eq!(resolution.secondary[0].kind, SecondaryKind::Shock);
        assert_eq!(resolution.secondary[1].kind, SecondaryKind::Source);
        assert!(resolution.warnings.iter().any(|w| w.contains("organism")));
    }

    #[test]
    fn test_organism_table() {
        let resolution = resolve(&infection_findings(InfectionFinding {
            sepsis: true,
            organism: Some(Organism::Mrsa),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "A41.02");
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_severe_sepsis_without_shock() {
        let resolution = resolve(&infection_findings(InfectionFinding {
            sepsis: true,
            severe_sepsis: true,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.secondary[0].candidate.code, "R65.20");
    }

    #[test]
    fn test_post_procedural_adds_t_code() {
        let resolution = resolve(&infection_findings(InfectionFinding {
            sepsis: true,
            post_procedural: true,
            ..Default::default()
        }))
        .unwrap();
        assert!(resolution
            .secondary
            .iter()
            .any(|s| s.candidate.code == "T81.44XA"));
    }
}
