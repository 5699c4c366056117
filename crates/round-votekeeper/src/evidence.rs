//! Evidence of equivocation.

use std::collections::BTreeMap;

use roundbft_types::{ValidatorId, Vote};

/// Keeps track of evidence of equivocation: pairs of conflicting votes
/// cast by the same validator for the same `(epoch, round)`.
#[derive(Clone, Debug, Default)]
pub struct EvidenceMap {
    map: BTreeMap<ValidatorId, Vec<(Vote, Vote)>>,
}

impl EvidenceMap {
    /// Create a new, empty `EvidenceMap`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return whether any equivocation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Return the evidence of equivocation for a given validator, if any.
    pub fn get(&self, voter_id: &ValidatorId) -> Option<&[(Vote, Vote)]> {
        self.map.get(voter_id).map(Vec::as_slice)
    }

    /// Record a second, conflicting vote from the same validator as
    /// `existing`.
    ///
    /// # Panics
    /// Panics in debug builds if the two votes were not cast by the
    /// same validator.
    pub fn add(&mut self, existing: Vote, conflicting: Vote) {
        debug_assert_eq!(existing.voter_id(), conflicting.voter_id());
        self.map
            .entry(conflicting.voter_id())
            .or_default()
            .push((existing, conflicting));
    }
}
