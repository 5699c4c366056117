use std::collections::BTreeMap;

use roundbft_types::{Candidate, Data, DataId, RoundOutcome, ValidatorId, Vote};

use crate::evidence::EvidenceMap;

/// Errors raised by `RoundMessages` operations.
///
/// These are protocol precondition failures, not environment errors:
/// per the round layer's error taxonomy they are recovered locally by
/// the caller and never propagate further.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundMessagesError {
    /// The round has already completed; no further mutation is possible.
    #[error("round is already completed")]
    AlreadyCompleted,
    /// A second, differing vote arrived from a validator that already
    /// voted this round.
    #[error("validator {0:?} already voted this round")]
    AlreadyVoted(ValidatorId),
    /// `complete()` was called but the quorum conditions are not yet met.
    #[error("quorum conditions not yet met")]
    CannotComplete,
}

/// Per-round aggregator: stores all `Data` and `Vote` messages for the
/// active `(epoch, round)`, detects completion, and computes the round
/// outcome.
///
/// Owned exclusively by the round layer and replaced wholesale at the
/// start of every round; there are no cross-round references.
#[derive(Clone, Debug)]
pub struct RoundMessages {
    epoch_num: u64,
    round_num: u32,
    quorum: usize,
    validator_count: usize,
    datas: BTreeMap<DataId, Data>,
    votes: BTreeMap<ValidatorId, Vote>,
    evidence: EvidenceMap,
    completed: bool,
    result: Option<RoundOutcome>,
}

impl RoundMessages {
    /// Create a fresh, empty aggregator for `(epoch_num, round_num)`.
    ///
    /// `quorum` and `validator_count` come from the `Epoch` that is
    /// active for this round.
    pub fn new(epoch_num: u64, round_num: u32, quorum: usize, validator_count: usize) -> Self {
        Self {
            epoch_num,
            round_num,
            quorum,
            validator_count,
            datas: BTreeMap::new(),
            votes: BTreeMap::new(),
            evidence: EvidenceMap::new(),
            completed: false,
            result: None,
        }
    }

    /// The epoch this aggregator belongs to.
    pub fn epoch_num(&self) -> u64 {
        self.epoch_num
    }

    /// The round this aggregator belongs to.
    pub fn round_num(&self) -> u32 {
        self.round_num
    }

    /// Evidence of equivocation collected so far.
    pub fn evidence(&self) -> &EvidenceMap {
        &self.evidence
    }

    /// True once `complete()` has succeeded.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The `Data` messages received so far, keyed by id.
    pub fn datas(&self) -> &BTreeMap<DataId, Data> {
        &self.datas
    }

    /// The votes counted so far, keyed by voter.
    ///
    /// At most one vote per voter is ever present; a second, distinct
    /// vote from an already-voted validator is rejected by `add_vote`
    /// and recorded as equivocation instead.
    pub fn votes(&self) -> &BTreeMap<ValidatorId, Vote> {
        &self.votes
    }

    /// Insert `data` if the round is still open and no `Data` with the
    /// same id has already been recorded.
    ///
    /// A duplicate (same `id`) is a silent no-op.
    pub fn add_data(&mut self, data: Data) -> Result<(), RoundMessagesError> {
        if self.completed {
            return Err(RoundMessagesError::AlreadyCompleted);
        }

        self.datas.entry(data.id()).or_insert_with(|| {
            tracing::trace!(data_id = %data.id(), "recorded data");
            data
        });

        Ok(())
    }

    /// Insert `vote` if the round is still open and this voter has not
    /// already cast a different vote.
    ///
    /// An exact duplicate (same `id`, same voter) is a silent no-op. A
    /// second, differing vote from the same voter is equivocation: the
    /// first vote seen keeps counting, the second is recorded as
    /// evidence, and `AlreadyVoted` is returned so the caller can log
    /// or penalize.
    pub fn add_vote(&mut self, vote: Vote) -> Result<(), RoundMessagesError> {
        if self.completed {
            return Err(RoundMessagesError::AlreadyCompleted);
        }

        match self.votes.get(&vote.voter_id()) {
            Some(existing) if existing.id() == vote.id() => Ok(()),
            Some(existing) => {
                let voter_id = vote.voter_id();
                self.evidence.add(existing.clone(), vote);
                Err(RoundMessagesError::AlreadyVoted(voter_id))
            }
            None => {
                tracing::trace!(voter_id = ?vote.voter_id(), "recorded vote");
                self.votes.insert(vote.voter_id(), vote);
                Ok(())
            }
        }
    }

    /// Attempt to finalize the round.
    ///
    /// Fails with `AlreadyCompleted` if already done, or
    /// `CannotComplete` if quorum has not yet been reached or excluded.
    /// On success, `completed` becomes `true` and `result()` becomes
    /// available; no further mutation is possible after that point.
    pub fn complete(&mut self) -> Result<(), RoundMessagesError> {
        if self.completed {
            return Err(RoundMessagesError::AlreadyCompleted);
        }

        match self.compute_outcome() {
            Some(outcome) => {
                tracing::debug!(epoch_num = self.epoch_num, round_num = self.round_num, success = matches!(outcome, RoundOutcome::Success(_)), "round completed");
                self.completed = true;
                self.result = Some(outcome);
                Ok(())
            }
            None => Err(RoundMessagesError::CannotComplete),
        }
    }

    /// The outcome computed by `complete()`.
    ///
    /// Returns `None` before completion.
    pub fn result(&self) -> Option<&RoundOutcome> {
        self.result.as_ref()
    }

    /// Completion algorithm (spec §4.4):
    ///
    /// 1. If any `Data` has at least `quorum` affirmative votes, the
    ///    round succeeds; ties on simultaneous quorum are broken by
    ///    picking the lexicographically smallest `DataId` (the
    ///    `BTreeMap` iteration order already gives us this for free).
    /// 2. Else, if no `Data` can still reach quorum given how many
    ///    voters have already spoken, the round fails.
    /// 3. Else, completion cannot yet be determined.
    fn compute_outcome(&self) -> Option<RoundOutcome> {
        let mut affirmative_by_data: BTreeMap<DataId, Vec<Vote>> = BTreeMap::new();

        for vote in self.votes.values() {
            if let Some(data_id) = vote.data_id() {
                // A NoneData can never be committed, even if a byzantine
                // voter claims to vote affirmatively for its id.
                if self.is_none_data(data_id) {
                    continue;
                }
                affirmative_by_data.entry(data_id).or_default().push(vote.clone());
            }
        }

        for (data_id, votes) in &affirmative_by_data {
            if votes.len() >= self.quorum {
                let Some(Data::Normal(data)) = self.datas.get(data_id).cloned() else {
                    // We have quorum for a Data we never actually stored;
                    // this can only happen under a byzantine network that
                    // never delivered the Data this node voted for.
                    continue;
                };

                let certificate = votes
                    .iter()
                    .filter_map(|v| match v {
                        Vote::Affirmative(v) => Some(v.clone()),
                        _ => None,
                    })
                    .collect();

                return Some(RoundOutcome::Success(Candidate::new(data, certificate)));
            }
        }

        let cast = self.votes.len();
        let max_affirmative = affirmative_by_data.values().map(Vec::len).max().unwrap_or(0);

        if self.validator_count - cast + max_affirmative < self.quorum {
            return Some(RoundOutcome::Failure {
                votes: self.votes.values().cloned().collect(),
            });
        }

        None
    }

    fn is_none_data(&self, data_id: DataId) -> bool {
        matches!(self.datas.get(&data_id), Some(Data::None(_)))
    }
}
