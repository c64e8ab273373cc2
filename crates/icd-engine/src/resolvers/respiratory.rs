//! Respiratory domain resolver.
//!
//! COPD combination codes are checked before the standalone pneumonia
//! and respiratory-failure codes; organism-specific pneumonia and the
//! failure acuity × gas-exchange matrix are explicit tables.

use icd_types::{
    well_known, Acuity, CandidateCode, FindingSet, Organism, Resolution,
    RespiratoryFailureFinding, SecondaryCode, SecondaryKind,
};

/// Resolves the respiratory finding bundle, if present.
pub fn resolve(findings: &FindingSet) -> Option<Resolution> {
    let resp = findings.respiratory.as_ref()?;
    let mut warnings = Vec::new();
    let mut secondary = Vec::new();

    let primary = if resp.copd && resp.pneumonia {
        // COPD with an acute lower respiratory infection: combination
        // code plus the infection itself.
        let (pneumonia, pneumonia_label) = pneumonia_code(resp.organism);
        secondary.push(SecondaryCode::new(
            CandidateCode::new(pneumonia, pneumonia_label, "respiratory", 0.8)
                .with_guideline_rule("Use additional code to identify the infection"),
            SecondaryKind::Manifestation,
        ));
        CandidateCode::new(
            well_known::COPD_WITH_LRI,
            "Chronic obstructive pulmonary disease with (acute) lower respiratory infection",
            "respiratory",
            0.85,
        )
    } else if resp.copd && resp.copd_exacerbation {
        CandidateCode::new(
            well_known::COPD_WITH_EXACERBATION,
            "Chronic obstructive pulmonary disease with (acute) exacerbation",
            "respiratory",
            0.85,
        )
    } else if resp.pneumonia {
        let (icd_code, label) = pneumonia_code(resp.organism);
        if resp.organism.is_none() {
            warnings.push("Pneumonia organism not identified; coded as unspecified".to_string());
        }
        CandidateCode::new(icd_code, label, "respiratory", 0.8)
    } else if let Some(failure) = resp.respiratory_failure {
        let (icd_code, label) = respiratory_failure_code(failure, &mut warnings);
        CandidateCode::new(icd_code, label, "respiratory", 0.85)
    } else if resp.copd {
        CandidateCode::new(
            well_known::COPD_UNSPECIFIED,
            "Chronic obstructive pulmonary disease, unspecified",
            "respiratory",
            0.7,
        )
    } else {
        return None;
    };

    // Respiratory failure accompanying a COPD/pneumonia primary is
    // still reportable.
    if let Some(failure) = resp.respiratory_failure {
        if !primary.code.starts_with("J96") {
            let (icd_code, label) = respiratory_failure_code(failure, &mut warnings);
            secondary.push(SecondaryCode::new(
                CandidateCode::new(icd_code, label, "respiratory", 0.8),
                SecondaryKind::Manifestation,
            ));
        }
    }

    Some(Resolution {
        primary,
        secondary,
        warnings,
    })
}

/// Organism → pneumonia code table (J12–J18).
fn pneumonia_code(organism: Option<Organism>) -> (&'static str, &'static str) {
    use Organism::*;
    match organism {
        Some(Pneumococcus) => ("J13", "Pneumonia due to Streptococcus pneumoniae"),
        Some(StaphAureus) => (
            "J15.211",
            "Pneumonia due to Methicillin susceptible Staphylococcus aureus",
        ),
        Some(Mrsa) => (
            "J15.212",
            "Pneumonia due to Methicillin resistant Staphylococcus aureus",
        ),
        Some(EColi) => ("J15.5", "Pneumonia due to Escherichia coli"),
        Some(Pseudomonas) => ("J15.1", "Pneumonia due to Pseudomonas"),
        Some(Klebsiella) => ("J15.0", "Pneumonia due to Klebsiella pneumoniae"),
        Some(GroupAStrep) | Some(GroupBStrep) => ("J15.4", "Pneumonia due to other streptococci"),
        None => (well_known::PNEUMONIA_UNSPECIFIED, "Pneumonia, unspecified organism"),
    }
}

/// Respiratory failure acuity × gas-exchange matrix (J96).
fn respiratory_failure_code(
    failure: RespiratoryFailureFinding,
    warnings: &mut Vec<String>,
) -> (&'static str, &'static str) {
    use Acuity::*;
    let acuity = failure.acuity.unwrap_or_else(|| {
        warnings.push("Respiratory failure acuity not documented; coded as acute".to_string());
        Acute
    });
    match (acuity, failure.hypoxia, failure.hypercapnia) {
        (Acute, true, _) => ("J96.01", "Acute respiratory failure with hypoxia"),
        (Acute, false, true) => ("J96.02", "Acute respiratory failure with hypercapnia"),
        (Acute, false, false) => (
            "J96.00",
            "Acute respiratory failure, unspecified whether with hypoxia or hypercapnia",
        ),
        (Chronic, true, _) => ("J96.11", "Chronic respiratory failure with hypoxia"),
        (Chronic, false, true) => ("J96.12", "Chronic respiratory failure with hypercapnia"),
        (Chronic, false, false) => (
            "J96.10",
            "Chronic respiratory failure, unspecified whether with hypoxia or hypercapnia",
        ),
        (AcuteOnChronic, true, _) => (
            "J96.21",
            "Acute and chronic respiratory failure with hypoxia",
        ),
        (AcuteOnChronic, false, true) => (
            "J96.22",
            "Acute and chronic respiratory failure with hypercapnia",
        ),
        (AcuteOnChronic, false, false) => (
            "J96.20",
            "Acute and chronic respiratory failure, unspecified whether with hypoxia or hypercapnia",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icd_types::RespiratoryFinding;

    fn resp_findings(resp: RespiratoryFinding) -> FindingSet {
        FindingSet {
            respiratory: Some(resp),
            ..Default::default()
        }
    }

    #[test]
    fn test_abstains_without_finding() {
        assert!(resolve(&FindingSet::default()).is_none());
        assert!(resolve(&resp_findings(RespiratoryFinding::default())).is_none());
    }

    #[test]
    fn test_copd_with_pneumonia_combination() {
        let resolution = resolve(&resp_findings(RespiratoryFinding {
            copd: true,
            pneumonia: true,
            organism: Some(Organism::Pneumococcus),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "J44.0");
        assert_eq!(resolution.secondary[0].candidate.code, "J13");
    }

    #[test]
    fn test_copd_exacerbation() {
        let resolution = resolve(&resp_findings(RespiratoryFinding {
            copd: true,
            copd_exacerbation: true,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "J44.1");
    }

    #[test]
    fn test_pneumonia_unspecified_organism_warns() {
        let resolution = resolve(&resp_findings(RespiratoryFinding {
            pneumonia: true,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "J18.9");
        assert!(!resolution.warnings.is_empty());
    }

    #[test]
    fn test_respiratory_failure_matrix() {
        let resolution = resolve(&resp_findings(RespiratoryFinding {
            respiratory_failure: Some(RespiratoryFailureFinding {
                acuity: Some(Acuity::AcuteOnChronic),
                hypoxia: true,
                hypercapnia: false,
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "J96.21");
    }

    #[test]
    fn test_failure_secondary_alongside_copd() {
        let resolution = resolve(&resp_findings(RespiratoryFinding {
            copd: true,
            copd_exacerbation: true,
            respiratory_failure: Some(RespiratoryFailureFinding {
                acuity: Some(Acuity::Acute),
                hypoxia: true,
                hypercapnia: false,
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "J44.1");
        assert!(resolution
            .secondary
            .iter()
            .any(|s| s.candidate.code == "J96.01"));
    }
}
