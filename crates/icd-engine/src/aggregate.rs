//! Candidate aggregation.
//!
//! Flattens the per-domain resolutions into one deduplicated candidate
//! pool. Pool order is deterministic: resolvers run in registry order,
//! and within a domain the primary precedes its companions. Duplicate
//! codes keep a single pooled entry.

use icd_types::{CandidateCode, FindingSet, SecondaryKind};
use tracing::debug;

use crate::resolvers::REGISTRY;

/// A candidate in the pool, tagged with the role its domain gave it.
#[derive(Debug, Clone, PartialEq)]
pub struct PooledCandidate {
    /// The candidate code.
    pub candidate: CandidateCode,
    /// `None` for a domain primary, otherwise the companion role.
    pub kind: Option<SecondaryKind>,
}

impl PooledCandidate {
    /// Returns true if this candidate was some domain's primary.
    pub fn is_primary(&self) -> bool {
        self.kind.is_none()
    }
}

/// The deduplicated candidate pool plus accumulated warnings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    /// Pooled candidates in deterministic order.
    pub candidates: Vec<PooledCandidate>,
    /// Warnings raised by the resolvers.
    pub warnings: Vec<String>,
}

impl CandidatePool {
    /// Returns true if no resolver produced a candidate.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the pooled entry for a code, if present.
    pub fn find(&self, code: &str) -> Option<&PooledCandidate> {
        self.candidates.iter().find(|c| c.candidate.code == code)
    }
}

/// Runs every registered resolver and aggregates the results.
pub fn aggregate(findings: &FindingSet) -> CandidatePool {
    let mut pool = CandidatePool::default();
    for (domain, resolve) in REGISTRY {
        let Some(resolution) = resolve(findings) else {
            continue;
        };
        debug!(
            domain,
            primary = %resolution.primary.code,
            companions = resolution.secondary.len(),
            "domain resolved"
        );
        pool.warnings.extend(resolution.warnings);
        insert(&mut pool.candidates, resolution.primary, None);
        for secondary in resolution.secondary {
            insert(&mut pool.candidates, secondary.candidate, Some(secondary.kind));
        }
    }
    pool
}

/// Inserts a candidate, deduplicating by code.
///
/// A primary role outranks a companion role for the same code; between
/// equal roles the higher base score wins and the first-seen entry
/// wins ties.
fn insert(candidates: &mut Vec<PooledCandidate>, candidate: CandidateCode, kind: Option<SecondaryKind>) {
    let incoming = PooledCandidate { candidate, kind };
    match candidates
        .iter_mut()
        .find(|c| c.candidate.code == incoming.candidate.code)
    {
        Some(existing) => {
            let role_upgrade = incoming.is_primary() && !existing.is_primary();
            let same_role = incoming.is_primary() == existing.is_primary();
            if role_upgrade
                || (same_role && incoming.candidate.base_score > existing.candidate.base_score)
            {
                *existing = incoming;
            }
        }
        None => candidates.push(incoming),
    }
}
