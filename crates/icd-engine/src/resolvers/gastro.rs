//! Gastrointestinal domain resolver.
//!
//! Peptic ulcer coding uses the site × complication matrix (K25/K26);
//! an ulcer with hemorrhage is a combination code, so a bare GI-bleed
//! finding is only coded when no ulcer explains it.

use icd_types::{
    well_known, Acuity, CandidateCode, FindingSet, GiUlcerFinding, Resolution, UlcerSite,
};

/// Resolves the gastrointestinal finding bundle, if present.
pub fn resolve(findings: &FindingSet) -> Option<Resolution> {
    let gastro = findings.gastro.as_ref()?;
    let mut warnings = Vec::new();

    let primary = if let Some(ulcer) = gastro.ulcer {
        let (icd_code, label) = ulcer_code(ulcer);
        if gastro.gi_bleed && !ulcer.hemorrhage {
            warnings.push(
                "GI bleeding documented alongside an ulcer without hemorrhage; verify documentation"
                    .to_string(),
            );
        }
        CandidateCode::new(icd_code, label, "gastro", 0.85)
    } else if gastro.gi_bleed {
        CandidateCode::new(
            well_known::GI_HEMORRHAGE,
            "Gastrointestinal hemorrhage, unspecified",
            "gastro",
            0.7,
        )
    } else if let Some(acuity) = gastro.pancreatitis {
        let (icd_code, label) = pancreatitis_code(acuity);
        CandidateCode::new(icd_code, label, "gastro", 0.8)
    } else if gastro.gerd {
        CandidateCode::new(
            "K21.9",
            "Gastro-esophageal reflux disease without esophagitis",
            "gastro",
            0.7,
        )
    } else {
        return None;
    };

    if gastro.pancreatitis.is_some() && !primary.code.starts_with("K85") && !primary.code.starts_with("K86")
    {
        warnings.push(
            "Pancreatitis also documented; a more specific gastrointestinal primary was selected"
                .to_string(),
        );
    }

    Some(Resolution {
        primary,
        secondary: Vec::new(),
        warnings,
    })
}

/// Peptic ulcer site × complication matrix (K25/K26).
fn ulcer_code(ulcer: GiUlcerFinding) -> (&'static str, &'static str) {
    use UlcerSite::*;
    match (ulcer.site, ulcer.hemorrhage, ulcer.perforation) {
        (Gastric, true, true) => (
            "K25.2",
            "Acute gastric ulcer with both hemorrhage and perforation",
        ),
        (Gastric, true, false) => ("K25.0", "Acute gastric ulcer with hemorrhage"),
        (Gastric, false, true) => ("K25.1", "Acute gastric ulcer with perforation"),
        (Gastric, false, false) => (
            "K25.9",
            "Gastric ulcer, unspecified as acute or chronic, without hemorrhage or perforation",
        ),
        (Duodenal, true, true) => (
            "K26.2",
            "Acute duodenal ulcer with both hemorrhage and perforation",
        ),
        (Duodenal, true, false) => ("K26.0", "Acute duodenal ulcer with hemorrhage"),
        (Duodenal, false, true) => ("K26.1", "Acute duodenal ulcer with perforation"),
        (Duodenal, false, false) => (
            "K26.9",
            "Duodenal ulcer, unspecified as acute or chronic, without hemorrhage or perforation",
        ),
    }
}

/// Pancreatitis acuity table.
fn pancreatitis_code(acuity: Acuity) -> (&'static str, &'static str) {
    match acuity {
        Acuity::Acute | Acuity::AcuteOnChronic => (
            "K85.90",
            "Acute pancreatitis without necrosis or infection, unspecified",
        ),
        Acuity::Chronic => ("K86.1", "Other chronic pancreatitis"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icd_types::GastroFinding;

    fn gastro_findings(gastro: GastroFinding) -> FindingSet {
        FindingSet {
            gastro: Some(gastro),
            ..Default::default()
        }
    }

    #[test]
    fn test_abstains_without_finding() {
        assert!(resolve(&FindingSet::default()).is_none());
        assert!(resolve(&gastro_findings(GastroFinding::default())).is_none());
    }

    #[test]
    fn test_ulcer_matrix() {
        let resolution = resolve(&gastro_findings(GastroFinding {
            ulcer: Some(GiUlcerFinding {
                site: UlcerSite::Duodenal,
                hemorrhage: true,
                perforation: false,
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "K26.0");

        let resolution = resolve(&gastro_findings(GastroFinding {
            ulcer: Some(GiUlcerFinding {
                site: UlcerSite::Gastric,
                hemorrhage: true,
                perforation: true,
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "K25.2");
    }

    #[test]
    fn test_bleeding_ulcer_combination_wins_over_k92() {
        // The ulcer-with-hemorrhage combination code covers the bleed.
        let resolution = resolve(&gastro_findings(GastroFinding {
            gi_bleed: true,
            ulcer: Some(GiUlcerFinding {
                site: UlcerSite::Gastric,
                hemorrhage: true,
                perforation: false,
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "K25.0");
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_bare_gi_bleed() {
        let resolution = resolve(&gastro_findings(GastroFinding {
            gi_bleed: true,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "K92.2");
    }

    #[test]
    fn test_pancreatitis_acuity() {
        let resolution = resolve(&gastro_findings(GastroFinding {
            pancreatitis: Some(Acuity::Chronic),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "K86.1");
    }
}
