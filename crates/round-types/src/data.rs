use crate::{DataId, ValidatorId};
use crate::vote::AffirmativeVote;

/// A real proposal: the payload-bearing `Data` a proposer puts forward
/// for a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalData {
    /// Content-addressed id of this proposal.
    pub id: DataId,
    /// Id of the parent proposal this one extends.
    pub prev_id: DataId,
    /// Validator that produced this proposal.
    pub proposer_id: ValidatorId,
    /// Epoch this proposal belongs to.
    pub epoch_num: u64,
    /// Round this proposal belongs to.
    pub round_num: u32,
    /// Height of this proposal (strictly greater than its parent's).
    pub number: u64,
    /// The quorum certificate that committed the parent.
    pub prev_votes: Vec<AffirmativeVote>,
}

/// The synthetic placeholder inserted at the start of every round,
/// before the real proposal (if any) has arrived.
///
/// `NoneData` for a given round is uniquely determined by `(epoch_num,
/// round_num)`: it carries the round's proposer but no payload, and is
/// never voted affirmatively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoneData {
    /// Id of this placeholder, deterministic in `(epoch_num, round_num)`.
    pub id: DataId,
    /// The proposer of this round (not necessarily this node).
    pub proposer_id: ValidatorId,
    /// Epoch this placeholder belongs to.
    pub epoch_num: u64,
    /// Round this placeholder belongs to.
    pub round_num: u32,
}

/// A message proposing (or standing in for) a value for a round.
///
/// Modeled as a tagged sum rather than a class hierarchy, per the
/// round layer's design notes: pattern-matching on the two variants is
/// what the completion algorithm and vote-verification logic need.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Data {
    /// A real, payload-bearing proposal.
    Normal(NormalData),
    /// The round-start placeholder; never committed.
    None(NoneData),
}

impl Data {
    /// The id of this message, regardless of variant.
    pub fn id(&self) -> DataId {
        match self {
            Data::Normal(d) => d.id,
            Data::None(d) => d.id,
        }
    }

    /// The validator that produced this message.
    pub fn proposer_id(&self) -> &ValidatorId {
        match self {
            Data::Normal(d) => &d.proposer_id,
            Data::None(d) => &d.proposer_id,
        }
    }

    /// The epoch this message belongs to.
    pub fn epoch_num(&self) -> u64 {
        match self {
            Data::Normal(d) => d.epoch_num,
            Data::None(d) => d.epoch_num,
        }
    }

    /// The round this message belongs to.
    pub fn round_num(&self) -> u32 {
        match self {
            Data::Normal(d) => d.round_num,
            Data::None(d) => d.round_num,
        }
    }

    /// The id of the parent this proposal extends, if any.
    ///
    /// Only `Normal` data has a parent; `NoneData` carries no payload
    /// and thus no chain link.
    pub fn prev_id(&self) -> Option<DataId> {
        match self {
            Data::Normal(d) => Some(d.prev_id),
            Data::None(_) => None,
        }
    }

    /// True iff this is the round-start placeholder rather than a real
    /// proposal. A `NoneData` is never voted affirmatively.
    pub fn is_not(&self) -> bool {
        matches!(self, Data::None(_))
    }
}
