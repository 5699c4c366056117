use async_trait::async_trait;

use crate::data::{NoneData, NormalData};
use crate::error::CapabilityError;
use crate::vote::{AffirmativeVote, Vote};
use crate::{DataId, ValidatorId};

/// External-facing contract for creating `Data` messages and verifying
/// ones received from the network.
///
/// Every operation may suspend: building a real proposal typically
/// involves asking a mempool for transactions and signing the result.
/// The round layer never inspects how a `DataFactory` does its job; it
/// only reacts to `Ok`/`Err`.
#[async_trait]
pub trait DataFactory: Send + Sync + 'static {
    /// The verifier this factory hands out via [`create_data_verifier`](Self::create_data_verifier).
    type Verifier: DataVerifier;

    /// Build a new proposal extending `prev_id` at the given height.
    async fn create_data(
        &self,
        number: u64,
        prev_id: DataId,
        epoch_num: u64,
        round_num: u32,
        prev_votes: Vec<AffirmativeVote>,
    ) -> Result<NormalData, CapabilityError>;

    /// Build the round-start placeholder for `(epoch_num, round_num)`.
    async fn create_none_data(
        &self,
        epoch_num: u64,
        round_num: u32,
        proposer_id: ValidatorId,
    ) -> Result<NoneData, CapabilityError>;

    /// Obtain a verifier for `Data` messages received from the network.
    fn create_data_verifier(&self) -> Self::Verifier;
}

/// Validates a `Data` message received from the network (or
/// self-proposed, though the round layer skips verification of its own
/// proposals — see `RoundLayer::verify_data`).
#[async_trait]
pub trait DataVerifier: Send + Sync + 'static {
    /// Validate `data`. Any `Err` is treated as "invalid" by the round
    /// layer, downgrading the vote it would have cast to a `NoneVote`.
    async fn verify(&self, data: &NormalData) -> Result<(), CapabilityError>;
}

/// External-facing contract for creating this node's own votes and
/// verifying ones received from the network.
#[async_trait]
pub trait VoteFactory: Send + Sync + 'static {
    /// The verifier this factory hands out via [`create_vote_verifier`](Self::create_vote_verifier).
    type Verifier: VoteVerifier;

    /// Build an affirmative vote for `data_id`, believing `commit_id`
    /// to be the already-committed parent.
    async fn create_vote(
        &self,
        data_id: DataId,
        commit_id: DataId,
        epoch_num: u64,
        round_num: u32,
    ) -> Result<Vote, CapabilityError>;

    /// Build an explicit abstention for `(epoch_num, round_num)`.
    async fn create_none_vote(
        &self,
        commit_id: DataId,
        epoch_num: u64,
        round_num: u32,
    ) -> Result<Vote, CapabilityError>;

    /// Obtain a verifier for `Vote` messages received from the network.
    fn create_vote_verifier(&self) -> Self::Verifier;
}

/// Validates a `Vote` message received from the network.
#[async_trait]
pub trait VoteVerifier: Send + Sync + 'static {
    /// Validate `vote`. Any `Err` is treated as "invalid" by the round
    /// layer.
    async fn verify(&self, vote: &Vote) -> Result<(), CapabilityError>;
}
