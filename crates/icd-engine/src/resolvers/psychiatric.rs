//! Psychiatric domain resolver.
//!
//! Bipolar disorder outranks depression (F31 carries an Excludes1
//! against F32/F33), and depression outranks anxiety. The depression
//! table is episode × severity × psychosis.

use icd_types::{
    AnxietyKind, CandidateCode, DepressionEpisode, DepressionFinding, DepressionSeverity,
    FindingSet, Resolution,
};

/// Resolves the psychiatric finding bundle, if present.
pub fn resolve(findings: &FindingSet) -> Option<Resolution> {
    let psych = findings.psychiatric.as_ref()?;
    let mut warnings = Vec::new();

    let primary = if psych.bipolar {
        if psych.depression.is_some() {
            warnings.push(
                "Depression documented alongside bipolar disorder; bipolar disorder subsumes the \
                 depressive episode"
                    .to_string(),
            );
        }
        CandidateCode::new("F31.9", "Bipolar disorder, unspecified", "psychiatric", 0.8)
    } else if let Some(depression) = psych.depression {
        let (icd_code, label) = depression_code(depression, &mut warnings);
        CandidateCode::new(icd_code, label, "psychiatric", 0.8)
    } else if let Some(anxiety) = psych.anxiety {
        let (icd_code, label) = anxiety_code(anxiety);
        CandidateCode::new(icd_code, label, "psychiatric", 0.75)
    } else {
        return None;
    };

    if psych.anxiety.is_some() && !primary.code.starts_with("F41") {
        warnings.push(
            "Anxiety also documented; a mood-disorder primary was selected for this domain"
                .to_string(),
        );
    }

    Some(Resolution {
        primary,
        secondary: Vec::new(),
        warnings,
    })
}

/// Depression episode × severity × psychosis table (F32/F33).
fn depression_code(
    depression: DepressionFinding,
    warnings: &mut Vec<String>,
) -> (&'static str, &'static str) {
    use DepressionEpisode::*;
    use DepressionSeverity::*;

    let episode = depression.episode.unwrap_or_else(|| {
        warnings.push(
            "Depressive episode pattern not documented; coded as single episode".to_string(),
        );
        Single
    });

    if depression.with_psychosis {
        return match episode {
            Single => (
                "F32.3",
                "Major depressive disorder, single episode, severe with psychotic features",
            ),
            Recurrent => (
                "F33.3",
                "Major depressive disorder, recurrent, severe with psychotic symptoms",
            ),
        };
    }

    match (episode, depression.severity) {
        (Single, Some(Mild)) => ("F32.0", "Major depressive disorder, single episode, mild"),
        (Single, Some(Moderate)) => (
            "F32.1",
            "Major depressive disorder, single episode, moderate",
        ),
        (Single, Some(Severe)) => (
            "F32.2",
            "Major depressive disorder, single episode, severe without psychotic features",
        ),
        (Single, None) => (
            "F32.9",
            "Major depressive disorder, single episode, unspecified",
        ),
        (Recurrent, Some(Mild)) => ("F33.0", "Major depressive disorder, recurrent, mild"),
        (Recurrent, Some(Moderate)) => ("F33.1", "Major depressive disorder, recurrent, moderate"),
        (Recurrent, Some(Severe)) => (
            "F33.2",
            "Major depressive disorder, recurrent severe without psychotic features",
        ),
        (Recurrent, None) => ("F33.9", "Major depressive disorder, recurrent, unspecified"),
    }
}

/// Anxiety disorder table (F41).
fn anxiety_code(anxiety: AnxietyKind) -> (&'static str, &'static str) {
    match anxiety {
        AnxietyKind::Generalized => ("F41.1", "Generalized anxiety disorder"),
        AnxietyKind::Panic => (
            "F41.0",
            "Panic disorder [episodic paroxysmal anxiety] without agoraphobia",
        ),
        AnxietyKind::Unspecified => ("F41.9", "Anxiety disorder, unspecified"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icd_types::PsychiatricFinding;

    fn psych_findings(psych: PsychiatricFinding) -> FindingSet {
        FindingSet {
            psychiatric: Some(psych),
            ..Default::default()
        }
    }

    #[test]
    fn test_abstains_without_finding() {
        assert!(resolve(&FindingSet::default()).is_none());
        assert!(resolve(&psych_findings(PsychiatricFinding::default())).is_none());
    }

    #[test]
    fn test_bipolar_outranks_depression() {
        let resolution = resolve(&psych_findings(PsychiatricFinding {
            bipolar: true,
            depression: Some(DepressionFinding {
                episode: Some(DepressionEpisode::Recurrent),
                severity: Some(DepressionSeverity::Severe),
                with_psychosis: false,
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "F31.9");
        assert!(resolution.warnings.iter().any(|w| w.contains("bipolar")));
    }

    #[test]
    fn test_depression_matrix() {
        let resolution = resolve(&psych_findings(PsychiatricFinding {
            depression: Some(DepressionFinding {
                episode: Some(DepressionEpisode::Recurrent),
                severity: Some(DepressionSeverity::Moderate),
                with_psychosis: false,
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "F33.1");
    }

    #[test]
    fn test_psychosis_overrides_severity() {
        let resolution = resolve(&psych_findings(PsychiatricFinding {
            depression: Some(DepressionFinding {
                episode: Some(DepressionEpisode::Single),
                severity: Some(DepressionSeverity::Mild),
                with_psychosis: true,
            }),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "F32.3");
    }

    #[test]
    fn test_undocumented_episode_defaults_to_single() {
        let resolution = resolve(&psych_findings(PsychiatricFinding {
            depression: Some(DepressionFinding::default()),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "F32.9");
        assert!(!resolution.warnings.is_empty());
    }

    #[test]
    fn test_anxiety_alone_and_alongside_depression() {
        let resolution = resolve(&psych_findings(PsychiatricFinding {
            anxiety: Some(AnxietyKind::Panic),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "F41.0");

        let resolution = resolve(&psych_findings(PsychiatricFinding {
            depression: Some(DepressionFinding::default()),
            anxiety: Some(AnxietyKind::Generalized),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(resolution.primary.code, "F32.9");
        assert!(resolution.warnings.iter().any(|w| w.contains("Anxiety")));
    }
}
