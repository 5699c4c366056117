use roundbft_types::{AffirmativeVote, NormalData, ValidatorId};

/// Build a deterministic `ValidatorId` from a small integer, for
/// building validator sets in tests (`{A, B, C, D}` becomes
/// `validator_id(0)..validator_id(3)`).
pub fn validator_id(n: u8) -> ValidatorId {
    let mut bytes = [0u8; 20];
    bytes[19] = n;
    ValidatorId::new(bytes)
}

/// A deterministic genesis candidate: height 0, proposed by no one,
/// with an empty certificate. Used as the `candidate_data`/
/// `candidate_votes` pair passed to `RoundLayer::initialize` in tests.
pub fn genesis(epoch_num: u64) -> (NormalData, Vec<AffirmativeVote>) {
    let data = NormalData {
        id: roundbft_types::DataId::new([0; 32]),
        prev_id: roundbft_types::DataId::new([0; 32]),
        proposer_id: validator_id(0),
        epoch_num,
        round_num: 0,
        number: 0,
        prev_votes: Vec::new(),
    };
    (data, Vec::new())
}
