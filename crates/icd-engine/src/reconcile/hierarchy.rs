//! Hierarchy collapse.
//!
//! When the pool holds both a code and one of its decimal-prefix
//! descendants, only the more specific descendant is reported.

use icd_types::code;
use tracing::debug;

use crate::aggregate::PooledCandidate;

/// Drops every candidate that has a more specific descendant in the
/// pool.
pub fn collapse(candidates: &mut Vec<PooledCandidate>, warnings: &mut Vec<String>) {
    let mut dropped: Vec<String> = Vec::new();
    for parent in candidates.iter() {
        let has_descendant = candidates.iter().any(|child| {
            code::is_descendant_of(&child.candidate.code, &parent.candidate.code)
        });
        if has_descendant && !dropped.contains(&parent.candidate.code) {
            debug!(code = %parent.candidate.code, "collapsed into descendant");
            warnings.push(format!(
                "{} collapsed into a more specific code in the same family",
                parent.candidate.code
            ));
            dropped.push(parent.candidate.code.clone());
        }
    }
    candidates.retain(|c| !dropped.contains(&c.candidate.code));
}
