//! Neoplasm domain resolver.
//!
//! Primary and secondary malignancy codes come from per-site tables;
//! which one leads is decided later by the override that honors the
//! treatment-directed-at-secondary guideline. Ambiguous "metastatic X"
//! wording always carries a warning.

use icd_types::{
    CandidateCode, FindingSet, NeoplasmSite, Resolution, SecondaryCode, SecondaryKind,
};

/// Resolves the neoplasm finding bundle, if present.
pub fn resolve(findings: &FindingSet) -> Option<Resolution> {
    let neoplasm = findings.neoplasm.as_ref()?;
    if neoplasm.primary_site.is_none() && neoplasm.metastatic_sites.is_empty() {
        return None;
    }
    let mut warnings = Vec::new();
    let mut secondary = Vec::new();

    if neoplasm.wording_ambiguous {
        warnings.push(
            "Documentation wording is ambiguous between primary and metastatic malignancy; \
             verify the site of origin"
                .to_string(),
        );
    }

    let primary = match neoplasm.primary_site {
        Some(site) => {
            let (icd_code, label) = primary_site_code(site);
            CandidateCode::new(icd_code, label, "neoplasm", 0.85)
        }
        None => {
            // Metastases with an unknown primary.
            warnings.push(
                "Metastatic disease documented without a known primary site".to_string(),
            );
            CandidateCode::new(
                "C80.1",
                "Malignant (primary) neoplasm, unspecified",
                "neoplasm",
                0.6,
            )
        }
    };

    for &site in &neoplasm.metastatic_sites {
        let (icd_code, label) = secondary_site_code(site);
        let mut candidate = CandidateCode::new(icd_code, label, "neoplasm", 0.8);
        if neoplasm.treatment_directed_at_secondary {
            candidate = candidate.with_guideline_rule(
                "Treatment directed at the secondary site: sequence the secondary malignancy first",
            );
        }
        secondary.push(SecondaryCode::new(candidate, SecondaryKind::Manifestation));
    }

    Some(Resolution {
        primary,
        secondary,
        warnings,
    })
}

/// Site → primary malignancy code table (C00–C76).
fn primary_site_code(site: NeoplasmSite) -> (&'static str, &'static str) {
    use NeoplasmSite::*;
    match site {
        Lung => (
            "C34.90",
            "Malignant neoplasm of unspecified part of unspecified bronchus or lung",
        ),
        Breast => (
            "C50.919",
            "Malignant neoplasm of unspecified site of unspecified female breast",
        ),
        Colon => ("C18.9", "Malignant neoplasm of colon, unspecified"),
        Prostate => ("C61", "Malignant neoplasm of prostate"),
        Pancreas => ("C25.9", "Malignant neoplasm of pancreas, unspecified"),
        Liver => (
            "C22.9",
            "Malignant neoplasm of liver, not specified as primary or secondary",
        ),
        Bone => (
            "C41.9",
            "Malignant neoplasm of bone and articular cartilage, unspecified",
        ),
        Brain => ("C71.9", "Malignant neoplasm of brain, unspecified"),
        LymphNodes => (
            "C77.9",
            "Secondary and unspecified malignant neoplasm of lymph node, unspecified",
        ),
    }
}

/// Site → secondary (metastatic) malignancy code table (C77–C79).
fn secondary_site_code(site: NeoplasmSite) -> (&'static str, &'static str) {
    use NeoplasmSite::*;
    match site {
        Lung => (
            "C78.00",
            "Secondary malignant neoplasm of unspecified lung",
        ),
        Liver => (
            "C78.7",
            "Secondary malignant neoplasm of liver and intrahepatic bile duct",
        ),
        Bone => ("C79.51", "Secondary malignant neoplasm of bone"),
        Brain => ("C79.31", "Secondary malignant neoplasm of brain"),
        LymphNodes => (
            "C77.9",
            "Secondary and unspecified malignant neoplasm of lymph node, unspecified",
        ),
        Breast => ("C79.81", "Secondary malignant neoplasm of breast"),
        Colon | Prostate | Pancreas => (
            "C79.89",
            "Secondary malignant neoplasm of other specified sites",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icd_types::NeoplasmFinding;

    fn neoplasm_findings(neoplasm: NeoplasmFinding) -> FindingSet {
        FindingSet {
            neoplasm: Some(neoplasm),
            ..Default::default()
        }
    }

    #[test]
    fn test_abstains_without_sites() {
        assert!(resolve(&FindingSet::default()).is_none());
        assert!(resolve(&neoplasm_findings(NeoplasmFinding::default())).is_none());
    }

    #[test]
    fn test_primary_with_metastases() {
        let resolution = resolve(&neoplasm_findings(NeoplasmFinding {
            primary_site: Some(NeoplasmSite::Lung),
            metastatic_sites: vec![NeoplasmSite::Brain, NeoplasmSite::Bone],
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "C34.90");
        let codes: Vec<&str> = resolution
            .secondary
            .iter()
            .map(|s| s.candidate.code.as_str())
            .collect();
        assert_eq!(codes, vec!["C79.31", "C79.51"]);
    }

    #[test]
    fn test_unknown_primary() {
        let resolution = resolve(&neoplasm_findings(NeoplasmFinding {
            metastatic_sites: vec![NeoplasmSite::Liver],
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "C80.1");
        assert!(resolution
            .warnings
            .iter()
            .any(|w| w.contains("without a known primary")));
    }

    #[test]
    fn test_ambiguous_wording_always_warns() {
        let resolution = resolve(&neoplasm_findings(NeoplasmFinding {
            primary_site: Some(NeoplasmSite::Breast),
            metastatic_sites: vec![NeoplasmSite::Bone],
            wording_ambiguous: true,
            ..Default::default()
        }))
        .unwrap();
        assert!(resolution.warnings.iter().any(|w| w.contains("ambiguous")));
    }

    #[test]
    fn test_treatment_directed_flag_tags_secondaries() {
        let resolution = resolve(&neoplasm_findings(NeoplasmFinding {
            primary_site: Some(NeoplasmSite::Prostate),
            metastatic_sites: vec![NeoplasmSite::Bone],
            treatment_directed_at_secondary: true,
            ..Default::default()
        }))
        .unwrap();
        assert!(resolution.secondary[0]
            .candidate
            .guideline_rule
            .as_deref()
            .unwrap()
            .contains("secondary malignancy first"));
    }
}
