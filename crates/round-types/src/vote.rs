use crate::{DataId, ValidatorId, VoteId};

/// A vote in favor of a specific `Data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffirmativeVote {
    /// Id of this vote.
    pub id: VoteId,
    /// Id of the `Data` being voted for.
    pub data_id: DataId,
    /// Id of the parent `Data` this voter believes is already committed.
    pub commit_id: DataId,
    /// The validator casting this vote.
    pub voter_id: ValidatorId,
    /// Epoch this vote belongs to.
    pub epoch_num: u64,
    /// Round this vote belongs to.
    pub round_num: u32,
}

/// An explicit vote against the round (e.g. on timeout).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotVote {
    /// Id of this vote.
    pub id: VoteId,
    /// Id of the parent `Data` this voter believes is already committed.
    pub commit_id: DataId,
    /// The validator casting this vote.
    pub voter_id: ValidatorId,
    /// Epoch this vote belongs to.
    pub epoch_num: u64,
    /// Round this vote belongs to.
    pub round_num: u32,
}

/// An explicit abstention (e.g. cast when verification of a proposal
/// fails, rather than treating it as a vote against).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoneVote {
    /// Id of this vote.
    pub id: VoteId,
    /// Id of the parent `Data` this voter believes is already committed.
    pub commit_id: DataId,
    /// The validator casting this vote.
    pub voter_id: ValidatorId,
    /// Epoch this vote belongs to.
    pub epoch_num: u64,
    /// Round this vote belongs to.
    pub round_num: u32,
}

/// A validator's opinion on the `Data` proposed for a round.
///
/// Tagged sum over three kinds: a vote for a specific `Data`, a vote
/// against the round, or an explicit abstention. `is_not()`/`is_none()`
/// discriminate the latter two.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Vote {
    /// A vote in favor of a specific `Data`.
    Affirmative(AffirmativeVote),
    /// A vote against the round.
    Not(NotVote),
    /// An explicit abstention.
    None(NoneVote),
}

impl Vote {
    /// The id of this vote, regardless of variant.
    pub fn id(&self) -> VoteId {
        match self {
            Vote::Affirmative(v) => v.id,
            Vote::Not(v) => v.id,
            Vote::None(v) => v.id,
        }
    }

    /// The validator that cast this vote.
    pub fn voter_id(&self) -> ValidatorId {
        match self {
            Vote::Affirmative(v) => v.voter_id,
            Vote::Not(v) => v.voter_id,
            Vote::None(v) => v.voter_id,
        }
    }

    /// The epoch this vote belongs to.
    pub fn epoch_num(&self) -> u64 {
        match self {
            Vote::Affirmative(v) => v.epoch_num,
            Vote::Not(v) => v.epoch_num,
            Vote::None(v) => v.epoch_num,
        }
    }

    /// The round this vote belongs to.
    pub fn round_num(&self) -> u32 {
        match self {
            Vote::Affirmative(v) => v.round_num,
            Vote::Not(v) => v.round_num,
            Vote::None(v) => v.round_num,
        }
    }

    /// The id of the `Data` being voted for, if this is an affirmative vote.
    pub fn data_id(&self) -> Option<DataId> {
        match self {
            Vote::Affirmative(v) => Some(v.data_id),
            Vote::Not(_) | Vote::None(_) => None,
        }
    }

    /// The parent `Data` id this voter believes is committed.
    pub fn commit_id(&self) -> DataId {
        match self {
            Vote::Affirmative(v) => v.commit_id,
            Vote::Not(v) => v.commit_id,
            Vote::None(v) => v.commit_id,
        }
    }

    /// True iff this is a vote against the round.
    pub fn is_not(&self) -> bool {
        matches!(self, Vote::Not(_))
    }

    /// True iff this is an explicit abstention.
    pub fn is_none(&self) -> bool {
        matches!(self, Vote::None(_))
    }

    /// True iff this is a vote in favor of some `Data`.
    pub fn is_affirmative(&self) -> bool {
        matches!(self, Vote::Affirmative(_))
    }
}
