//! Shared clinical enumeration types.
//!
//! These enums are the discrete attributes extracted upstream from the
//! clinical narrative. Where an enum value maps to a code or code
//! fragment, the mapping lives in an explicit lookup method so each
//! entry is independently testable.

/// Chronic kidney disease stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CkdStage {
    /// CKD stage 1.
    Stage1,
    /// CKD stage 2.
    Stage2,
    /// CKD stage 3, sublevel not documented.
    Stage3,
    /// CKD stage 4.
    Stage4,
    /// CKD stage 5 (not on dialysis).
    Stage5,
    /// End-stage renal disease.
    EndStage,
}

impl CkdStage {
    /// Returns the N18.x code for this stage.
    ///
    /// # Examples
    ///
    /// ```
    /// use icd_types::CkdStage;
    ///
    /// assert_eq!(CkdStage::Stage4.n18_code(), "N18.4");
    /// assert_eq!(CkdStage::EndStage.n18_code(), "N18.6");
    /// ```
    pub fn n18_code(self) -> &'static str {
        match self {
            Self::Stage1 => "N18.1",
            Self::Stage2 => "N18.2",
            Self::Stage3 => "N18.30",
            Self::Stage4 => "N18.4",
            Self::Stage5 => "N18.5",
            Self::EndStage => "N18.6",
        }
    }

    /// Returns the display label for the N18.x code.
    pub fn n18_label(self) -> &'static str {
        match self {
            Self::Stage1 => "Chronic kidney disease, stage 1",
            Self::Stage2 => "Chronic kidney disease, stage 2 (mild)",
            Self::Stage3 => "Chronic kidney disease, stage 3 unspecified",
            Self::Stage4 => "Chronic kidney disease, stage 4 (severe)",
            Self::Stage5 => "Chronic kidney disease, stage 5",
            Self::EndStage => "End stage renal disease",
        }
    }

    /// Returns true for stage 5 or end-stage disease.
    ///
    /// Hypertensive combination codes (I12/I13) split on this boundary.
    pub fn is_stage5_or_esrd(self) -> bool {
        matches!(self, Self::Stage5 | Self::EndStage)
    }
}

/// Heart failure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeartFailureType {
    /// Systolic (HFrEF).
    Systolic,
    /// Diastolic (HFpEF).
    Diastolic,
    /// Combined systolic and diastolic.
    Combined,
}

/// Acuity of a condition episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Acuity {
    /// Acute presentation.
    Acute,
    /// Chronic condition.
    Chronic,
    /// Acute exacerbation of a chronic condition.
    AcuteOnChronic,
}

/// Laterality of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Laterality {
    /// Right side.
    Right,
    /// Left side.
    Left,
    /// Both sides.
    Bilateral,
}

/// Encounter type, encoded as the 7th character on injury and
/// poisoning codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterType {
    /// Initial encounter.
    Initial,
    /// Subsequent encounter.
    Subsequent,
    /// Sequela.
    Sequela,
}

impl EncounterType {
    /// Returns the 7th character for this encounter type.
    ///
    /// # Examples
    ///
    /// ```
    /// use icd_types::EncounterType;
    ///
    /// assert_eq!(EncounterType::Initial.seventh_character(), 'A');
    /// assert_eq!(EncounterType::Sequela.seventh_character(), 'S');
    /// ```
    pub fn seventh_character(self) -> char {
        match self {
            Self::Initial => 'A',
            Self::Subsequent => 'D',
            Self::Sequela => 'S',
        }
    }
}

/// Trimester of pregnancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trimester {
    /// First trimester (under 14 weeks).
    First,
    /// Second trimester (14 to under 28 weeks).
    Second,
    /// Third trimester (28 weeks and over).
    Third,
}

/// Causative organism of an infection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Organism {
    /// Methicillin-susceptible Staphylococcus aureus.
    StaphAureus,
    /// Methicillin-resistant Staphylococcus aureus.
    Mrsa,
    /// Group A Streptococcus.
    GroupAStrep,
    /// Group B Streptococcus.
    GroupBStrep,
    /// Streptococcus pneumoniae.
    Pneumococcus,
    /// Escherichia coli.
    EColi,
    /// Pseudomonas species.
    Pseudomonas,
    /// Klebsiella pneumoniae.
    Klebsiella,
}

/// Anatomic source of a systemic infection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfectionSource {
    /// Urinary tract (urosepsis documentation).
    Urinary,
    /// Pulmonary source.
    Pneumonia,
    /// Skin and soft tissue source.
    Cellulitis,
}

/// Intent of a poisoning or drug-related event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    /// Accidental (unintentional) poisoning.
    Accidental,
    /// Intentional self-harm.
    IntentionalSelfHarm,
    /// Assault.
    Assault,
    /// Undetermined intent.
    Undetermined,
    /// Adverse effect of a correctly administered substance.
    AdverseEffect,
    /// Underdosing of a prescribed substance.
    Underdosing,
}

impl Intent {
    /// Returns the final code digit selecting the intent column of a
    /// T-code row.
    ///
    /// # Examples
    ///
    /// ```
    /// use icd_types::Intent;
    ///
    /// assert_eq!(Intent::Accidental.t_code_digit(), '1');
    /// assert_eq!(Intent::AdverseEffect.t_code_digit(), '5');
    /// ```
    pub fn t_code_digit(self) -> char {
        match self {
            Self::Accidental => '1',
            Self::IntentionalSelfHarm => '2',
            Self::Assault => '3',
            Self::Undetermined => '4',
            Self::AdverseEffect => '5',
            Self::Underdosing => '6',
        }
    }

    /// Returns true if this intent represents a poisoning (the T-code
    /// sequences first) rather than an adverse effect or underdosing
    /// (the manifestation sequences first).
    pub fn is_poisoning(self) -> bool {
        matches!(
            self,
            Self::Accidental | Self::IntentionalSelfHarm | Self::Assault | Self::Undetermined
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ckd_stage_table() {
        assert_eq!(CkdStage::Stage1.n18_code(), "N18.1");
        assert_eq!(CkdStage::Stage3.n18_code(), "N18.30");
        assert_eq!(CkdStage::Stage5.n18_code(), "N18.5");
        assert!(CkdStage::Stage5.is_stage5_or_esrd());
        assert!(CkdStage::EndStage.is_stage5_or_esrd());
        assert!(!CkdStage::Stage4.is_stage5_or_esrd());
    }

    #[test]
    fn test_seventh_character() {
        assert_eq!(EncounterType::Initial.seventh_character(), 'A');
        assert_eq!(EncounterType::Subsequent.seventh_character(), 'D');
        assert_eq!(EncounterType::Sequela.seventh_character(), 'S');
    }

    #[test]
    fn test_intent_digits_are_distinct() {
        let digits: Vec<char> = [
            Intent::Accidental,
            Intent::IntentionalSelfHarm,
            Intent::Assault,
            Intent::Undetermined,
            Intent::AdverseEffect,
            Intent::Underdosing,
        ]
        .iter()
        .map(|i| i.t_code_digit())
        .collect();
        let mut unique = digits.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), digits.len());
    }

    #[test]
    fn test_poisoning_vs_adverse_effect() {
        assert!(Intent::Accidental.is_poisoning());
        assert!(Intent::Undetermined.is_poisoning());
        assert!(!Intent::AdverseEffect.is_poisoning());
        assert!(!Intent::Underdosing.is_poisoning());
    }
}
