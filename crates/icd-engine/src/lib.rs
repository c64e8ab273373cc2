//! ICD-10-CM clinical coding rules engine.
//!
//! Turns a typed [`FindingSet`](icd_types::FindingSet) into a
//! guideline-compliant, ordered ICD-10-CM code sequence:
//!
//! 1. **Resolvers** — one pure function per clinical domain picks the
//!    domain's primary code and its mandated companions.
//! 2. **Aggregation** — the per-domain resolutions are flattened into
//!    one deduplicated candidate pool.
//! 3. **Reconciliation** — Excludes1/2 notes, hierarchy collapse,
//!    combination-code subsumption, and companion insertion.
//! 4. **Sequencing** — prioritized ordering rules, then independent
//!    validators; a validation failure empties the sequence.
//! 5. **Scoring, confidence, audit** — HCC flags, per-code scores, an
//!    encounter confidence with itemized factors, and a readable
//!    audit trail.
//!
//! ```
//! use icd_engine::{run_rules_engine, CodeMetadataStore};
//! use icd_types::{FindingSet, InfectionFinding, InfectionSource};
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
//! let output = run_rules_engine(&findings, &CodeMetadataStore::builtin());
//! let codes: Vec<&str> = output.sequence.iter().map(|c| c.code.as_str()).collect();
//! assert_eq!(codes, vec!["A41.9", "R65.21", "N39.0"]);
//! ```

#![warn(missing_docs)]

pub mod aggregate;
pub mod audit;
pub mod confidence;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod reconcile;
pub mod resolvers;
pub mod scoring;
pub mod sequencing;

pub use aggregate::{aggregate, CandidatePool, PooledCandidate};
pub use confidence::{ConfidenceFactor, ConfidenceReport};
pub use engine::{run_rules_engine, RulesEngineOutput};
pub use error::{EngineError, EngineResult};
pub use metadata::{CodeMetadataStore, SharedMetadata};
pub use reconcile::{reconcile, ReconciledPool};
pub use sequencing::{sequence, SequencedPool};
