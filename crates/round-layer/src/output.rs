use roundbft_types::{AffirmativeVote, Data, DataId, NormalData, Vote};

/// Events the round layer emits for the surrounding engine to act on.
#[derive(Clone, Debug)]
pub enum Output {
    /// Ship `data` to peers.
    BroadcastData(Data),
    /// Ship `vote` to peers.
    BroadcastVote(Vote),
    /// Loopback: re-deliver `data` through the same ingestion path a
    /// peer's message would take. Always emitted immediately after the
    /// matching `BroadcastData`.
    ReceiveData(Data),
    /// Loopback: re-deliver `vote` through the same ingestion path a
    /// peer's message would take. Always emitted immediately after the
    /// matching `BroadcastVote`.
    ReceiveVote(Vote),
    /// The outer layer's candidate was accepted (and may or may not
    /// have advanced the round).
    ChangedCandidate {
        /// The newly adopted candidate's proposal.
        data: NormalData,
        /// Its quorum certificate.
        votes: Vec<AffirmativeVote>,
    },
    /// A round has ended, successfully or not.
    RoundEnd(RoundEnd),
}

/// The outcome of a completed round, in the shape the outer engine
/// needs to advance: either a new candidate plus the id of what it
/// commits, or a failure with no commit.
#[derive(Clone, Debug)]
pub struct RoundEnd {
    /// Whether the round succeeded.
    pub is_success: bool,
    /// The epoch the round belonged to.
    pub epoch_num: u64,
    /// The round that ended.
    pub round_num: u32,
    /// The new candidate's proposal, if the round succeeded.
    pub candidate_data: Option<NormalData>,
    /// The new candidate's certificate (or, on failure, whatever votes
    /// were cast before exclusion was detected).
    pub candidate_votes: Vec<Vote>,
    /// The id of the `Data` this round commits: its candidate's parent.
    /// `None` unless the round succeeded.
    pub commit_id: Option<DataId>,
}
