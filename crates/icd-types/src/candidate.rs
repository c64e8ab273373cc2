//! Candidate and sequenced code types.
//!
//! A [`CandidateCode`] is produced by exactly one resolver or
//! reconciliation step and is never mutated afterward, only replaced.
//! A [`SequencedCode`] is the post-sequencing output form that flows
//! into scoring, confidence, and audit.

use crate::IcdCode;

/// The guideline role of a secondary code emitted alongside a primary
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SecondaryKind {
    /// Manifestation of the primary condition.
    Manifestation,
    /// Causative organism.
    Organism,
    /// Shock / organ-dysfunction code.
    Shock,
    /// Anatomic infection source.
    Source,
    /// Outcome or status code.
    Outcome,
    /// External cause of injury or drug event.
    ExternalCause,
    /// Associated pain code.
    Pain,
}

/// A candidate diagnosis code with its provenance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateCode {
    /// The ICD-10-CM code.
    pub code: IcdCode,
    /// Human-readable code description.
    pub label: String,
    /// The finding or rule that produced this candidate.
    pub triggered_by: String,
    /// Optional free-text rationale.
    pub rationale: Option<String>,
    /// The guideline rule applied, when one was.
    pub guideline_rule: Option<String>,
    /// Resolver-assigned base plausibility in [0, 1].
    pub base_score: f64,
}

impl CandidateCode {
    /// Creates a candidate with the given code, label, and trigger tag.
    pub fn new(
        code: impl Into<String>,
        label: impl Into<String>,
        triggered_by: impl Into<String>,
        base_score: f64,
    ) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            triggered_by: triggered_by.into(),
            rationale: None,
            guideline_rule: None,
            base_score,
        }
    }

    /// Returns a copy with a rationale attached.
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    /// Returns a copy with a guideline rule attached.
    pub fn with_guideline_rule(mut self, rule: impl Into<String>) -> Self {
        self.guideline_rule = Some(rule.into());
        self
    }
}

/// A secondary code emitted alongside a primary resolution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecondaryCode {
    /// The candidate itself.
    pub candidate: CandidateCode,
    /// The guideline role this code plays.
    pub kind: SecondaryKind,
}

impl SecondaryCode {
    /// Creates a secondary code.
    pub fn new(candidate: CandidateCode, kind: SecondaryKind) -> Self {
        Self { candidate, kind }
    }
}

/// The unit a domain resolver returns; `None` from a resolver means
/// the domain is not applicable to this finding set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// The single primary candidate for this domain.
    pub primary: CandidateCode,
    /// Guideline-mandated companion codes, in emission order.
    pub secondary: Vec<SecondaryCode>,
    /// Documentation-ambiguity warnings raised while resolving.
    pub warnings: Vec<String>,
}

impl Resolution {
    /// Creates a resolution with only a primary code.
    pub fn primary(primary: CandidateCode) -> Self {
        Self {
            primary,
            secondary: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// The final, post-sequencing output element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequencedCode {
    /// The ICD-10-CM code.
    pub code: IcdCode,
    /// Human-readable code description.
    pub label: String,
    /// The finding or rule that produced this code.
    pub triggered_by: String,
    /// Hierarchical Condition Category (risk adjustment) flag.
    pub hcc: bool,
    /// Per-code plausibility score in [0, 1], display-only.
    pub score: Option<f64>,
}
