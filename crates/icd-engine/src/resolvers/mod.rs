//! Domain resolvers.
//!
//! Each resolver is a pure function from the finding set to at most
//! one [`Resolution`]: a single primary candidate, its
//! guideline-mandated companions, and any documentation warnings.
//! Resolvers run in the fixed order of [`REGISTRY`] so that aggregate
//! output is deterministic; cross-domain interactions (combination
//! codes, Excludes1 conflicts, sequencing) are handled downstream.

use icd_types::{FindingSet, Resolution};

pub mod cardiovascular;
pub mod diabetes;
pub mod gastro;
pub mod infection;
pub mod neoplasm;
pub mod obstetrics;
pub mod poisoning;
pub mod psychiatric;
pub mod renal;
pub mod respiratory;
pub mod trauma;

/// A domain resolver entry: the domain tag and its resolve function.
pub type ResolverEntry = (&'static str, fn(&FindingSet) -> Option<Resolution>);

/// All domain resolvers, in evaluation order.
///
/// Diabetes runs before renal so the renal resolver can defer CKD to
/// the diabetes combination code; poisoning runs last so its T-code
/// joins the pool after every manifestation domain has produced its
/// candidates.
pub const REGISTRY: &[ResolverEntry] = &[
    ("diabetes", diabetes::resolve),
    ("renal", renal::resolve),
    ("cardiovascular", cardiovascular::resolve),
    ("infection", infection::resolve),
    ("gastro", gastro::resolve),
    ("respiratory", respiratory::resolve),
    ("neoplasm", neoplasm::resolve),
    ("trauma", trauma::resolve),
    ("obstetrics", obstetrics::resolve),
    ("psychiatric", psychiatric::resolve),
    ("poisoning", poisoning::resolve),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_is_fixed() {
        let names: Vec<&str> = REGISTRY.iter().map(|(name, _)| *name).collect();
        assert_eq!(names[0], "diabetes");
        assert_eq!(names[1], "renal");
        assert_eq!(*names.last().unwrap(), "poisoning");
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_all_resolvers_abstain_on_empty_set() {
        let findings = FindingSet::default();
        for (name, resolve) in REGISTRY {
            assert!(resolve(&findings).is_none(), "{name} did not abstain");
        }
    }
}
