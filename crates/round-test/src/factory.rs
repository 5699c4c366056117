use async_trait::async_trait;
use sha3::{Digest, Keccak256};

use roundbft_types::{
    AffirmativeVote, CapabilityError, DataFactory, DataId, DataVerifier, NoneData, NoneVote,
    NormalData, NotVote, ValidatorId, Vote, VoteFactory, VoteId, VoteVerifier,
};

/// A non-cryptographic `DataFactory`/`VoteFactory` that derives message
/// ids by hashing their fields, and casts this node's votes as `voter_id`.
///
/// Verification always succeeds unless the factory was built with
/// [`FixtureFactory::always_rejecting`], which is useful for exercising
/// the round layer's "verifier fails → vote None" path.
#[derive(Clone, Debug)]
pub struct FixtureFactory {
    voter_id: ValidatorId,
    accept: bool,
}

impl FixtureFactory {
    /// A factory that signs as `voter_id` and verifies everything it
    /// is asked to verify.
    pub fn new(voter_id: ValidatorId) -> Self {
        Self {
            voter_id,
            accept: true,
        }
    }

    /// A factory whose verifiers reject everything, to exercise the
    /// "verification failure downgrades the vote to None" path.
    pub fn always_rejecting(voter_id: ValidatorId) -> Self {
        Self {
            voter_id,
            accept: false,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("fixture verifier rejected the message")]
struct RejectedError;

#[async_trait]
impl DataFactory for FixtureFactory {
    type Verifier = FixtureDataVerifier;

    async fn create_data(
        &self,
        number: u64,
        prev_id: DataId,
        epoch_num: u64,
        round_num: u32,
        prev_votes: Vec<AffirmativeVote>,
    ) -> Result<NormalData, CapabilityError> {
        let mut hasher = Keccak256::new();
        hasher.update(b"data");
        hasher.update(epoch_num.to_be_bytes());
        hasher.update(round_num.to_be_bytes());
        hasher.update(number.to_be_bytes());
        hasher.update(prev_id.0);
        hasher.update(self.voter_id.0);
        let id = DataId::new(hasher.finalize().into());

        Ok(NormalData {
            id,
            prev_id,
            proposer_id: self.voter_id,
            epoch_num,
            round_num,
            number,
            prev_votes,
        })
    }

    async fn create_none_data(
        &self,
        epoch_num: u64,
        round_num: u32,
        proposer_id: ValidatorId,
    ) -> Result<NoneData, CapabilityError> {
        let mut hasher = Keccak256::new();
        hasher.update(b"none-data");
        hasher.update(epoch_num.to_be_bytes());
        hasher.update(round_num.to_be_bytes());
        let id = DataId::new(hasher.finalize().into());

        Ok(NoneData {
            id,
            proposer_id,
            epoch_num,
            round_num,
        })
    }

    fn create_data_verifier(&self) -> Self::Verifier {
        FixtureDataVerifier {
            accept: self.accept,
        }
    }
}

/// A `DataVerifier` that either accepts or rejects everything,
/// depending on how its owning [`FixtureFactory`] was built.
#[derive(Clone, Debug)]
pub struct FixtureDataVerifier {
    accept: bool,
}

#[async_trait]
impl DataVerifier for FixtureDataVerifier {
    async fn verify(&self, _data: &NormalData) -> Result<(), CapabilityError> {
        if self.accept {
            Ok(())
        } else {
            Err(CapabilityError::new("fixture data verifier", RejectedError))
        }
    }
}

#[async_trait]
impl VoteFactory for FixtureFactory {
    type Verifier = FixtureVoteVerifier;

    async fn create_vote(
        &self,
        data_id: DataId,
        commit_id: DataId,
        epoch_num: u64,
        round_num: u32,
    ) -> Result<Vote, CapabilityError> {
        let mut hasher = Keccak256::new();
        hasher.update(b"vote-affirmative");
        hasher.update(data_id.0);
        hasher.update(commit_id.0);
        hasher.update(epoch_num.to_be_bytes());
        hasher.update(round_num.to_be_bytes());
        hasher.update(self.voter_id.0);
        let id = VoteId::new(hasher.finalize().into());

        Ok(Vote::Affirmative(AffirmativeVote {
            id,
            data_id,
            commit_id,
            voter_id: self.voter_id,
            epoch_num,
            round_num,
        }))
    }

    async fn create_none_vote(
        &self,
        commit_id: DataId,
        epoch_num: u64,
        round_num: u32,
    ) -> Result<Vote, CapabilityError> {
        let mut hasher = Keccak256::new();
        hasher.update(b"vote-none");
        hasher.update(commit_id.0);
        hasher.update(epoch_num.to_be_bytes());
        hasher.update(round_num.to_be_bytes());
        hasher.update(self.voter_id.0);
        let id = VoteId::new(hasher.finalize().into());

        Ok(Vote::None(NoneVote {
            id,
            commit_id,
            voter_id: self.voter_id,
            epoch_num,
            round_num,
        }))
    }

    fn create_vote_verifier(&self) -> Self::Verifier {
        FixtureVoteVerifier {
            accept: self.accept,
        }
    }
}

/// A `VoteVerifier` that either accepts or rejects everything,
/// depending on how its owning [`FixtureFactory`] was built.
#[derive(Clone, Debug)]
pub struct FixtureVoteVerifier {
    accept: bool,
}

#[async_trait]
impl VoteVerifier for FixtureVoteVerifier {
    async fn verify(&self, _vote: &Vote) -> Result<(), CapabilityError> {
        if self.accept {
            Ok(())
        } else {
            Err(CapabilityError::new("fixture vote verifier", RejectedError))
        }
    }
}

/// Build a deterministic `NotVote` for a given voter, for tests that
/// need to synthesize votes "from" other validators (since a real
/// `VoteFactory` only ever signs as its own node).
pub fn not_vote(voter_id: ValidatorId, commit_id: DataId, epoch_num: u64, round_num: u32) -> Vote {
    let mut hasher = Keccak256::new();
    hasher.update(b"vote-not");
    hasher.update(commit_id.0);
    hasher.update(epoch_num.to_be_bytes());
    hasher.update(round_num.to_be_bytes());
    hasher.update(voter_id.0);
    let id = VoteId::new(hasher.finalize().into());

    Vote::Not(NotVote {
        id,
        commit_id,
        voter_id,
        epoch_num,
        round_num,
    })
}

/// Build a deterministic affirmative vote "from" an arbitrary voter, for
/// tests that simulate other validators' votes arriving over the
/// network.
pub fn affirmative_vote_from(
    voter_id: ValidatorId,
    data_id: DataId,
    commit_id: DataId,
    epoch_num: u64,
    round_num: u32,
) -> Vote {
    let mut hasher = Keccak256::new();
    hasher.update(b"vote-affirmative");
    hasher.update(data_id.0);
    hasher.update(commit_id.0);
    hasher.update(epoch_num.to_be_bytes());
    hasher.update(round_num.to_be_bytes());
    hasher.update(voter_id.0);
    let id = VoteId::new(hasher.finalize().into());

    Vote::Affirmative(AffirmativeVote {
        id,
        data_id,
        commit_id,
        voter_id,
        epoch_num,
        round_num,
    })
}

/// Build a deterministic abstention "from" an arbitrary voter.
pub fn none_vote_from(voter_id: ValidatorId, commit_id: DataId, epoch_num: u64, round_num: u32) -> Vote {
    let mut hasher = Keccak256::new();
    hasher.update(b"vote-none");
    hasher.update(commit_id.0);
    hasher.update(epoch_num.to_be_bytes());
    hasher.update(round_num.to_be_bytes());
    hasher.update(voter_id.0);
    let id = VoteId::new(hasher.finalize().into());

    Vote::None(NoneVote {
        id,
        commit_id,
        voter_id,
        epoch_num,
        round_num,
    })
}
