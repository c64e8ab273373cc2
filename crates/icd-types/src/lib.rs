//! # icd-types
//!
//! Type definitions for ICD-10-CM clinical coding.
//!
//! This crate provides the data model shared by the coding rules
//! engine: per-domain clinical finding bundles, candidate and
//! sequenced code types, code-metadata entries, and helpers over
//! code strings.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support
//!   via serde. Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use icd_types::{FindingSet, InfectionFinding, InfectionSource, well_known};
//!
//! let findings = FindingSet {
//!     infection: Some(InfectionFinding {
//!         sepsis: true,
//!         septic_shock: true,
//!         source: Some(InfectionSource::Urinary),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! assert!(!findings.is_empty());
//! assert_eq!(well_known::SEPSIS_UNSPECIFIED, "A41.9");
//! ```

#![warn(missing_docs)]

mod candidate;
pub mod code;
mod enums;
mod findings;
mod metadata;
pub mod well_known;

pub use candidate::{CandidateCode, Resolution, SecondaryCode, SecondaryKind, SequencedCode};
pub use code::IcdCode;
pub use enums::{
    Acuity, CkdStage, EncounterType, HeartFailureType, InfectionSource, Intent, Laterality,
    Organism, Trimester,
};
pub use findings::{
    AnxietyKind, CardiovascularFinding, DepressionEpisode, DepressionFinding, DepressionSeverity,
    DiabetesComplication, DiabetesFinding, DiabetesType, ExternalCauseMechanism, FindingSet,
    FootUlcerSite, GastroFinding, GiUlcerFinding, HeartFailureFinding, InfectionFinding,
    InjuryFinding, InjuryKind, InjurySite, NeoplasmFinding, NeoplasmSite, ObstetricCondition,
    ObstetricFinding, PoisoningFinding, PsychiatricFinding, RenalFinding,
    RespiratoryFailureFinding, RespiratoryFinding, RetinopathySeverity, SubstanceClass,
    TraumaFinding, UlcerSeverity, UlcerSite,
};
pub use metadata::CodeMetadataEntry;
