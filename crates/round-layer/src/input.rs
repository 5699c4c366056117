use roundbft_types::{AffirmativeVote, Candidate, Data, Epoch, NormalData, Vote};

/// Events the surrounding engine delivers into the round layer.
#[derive(Clone, Debug)]
pub enum Input {
    /// Boot the round layer. Must be the first call ever made; calling
    /// it a second time is a programmer error.
    Initialize {
        /// The epoch the node was in before this one, if any.
        prev_epoch: Option<Epoch>,
        /// The epoch to start in.
        epoch: Epoch,
        /// The round to start in.
        round_num: u32,
        /// The most recently committed proposal.
        candidate_data: NormalData,
        /// Its quorum certificate.
        candidate_votes: Vec<AffirmativeVote>,
    },
    /// Start a new round within the current (or a new) epoch.
    RoundStart {
        /// The epoch the new round belongs to.
        epoch: Epoch,
        /// The round to start.
        round_num: u32,
    },
    /// A `Data` message arrived, from the network or as a broadcast
    /// loopback.
    ReceiveData(Data),
    /// A `Vote` message arrived, from the network or as a broadcast
    /// loopback.
    ReceiveVote(Vote),
    /// The outer layer supplies a new candidate, learned out of band
    /// (e.g. via sync with peers).
    ChangeCandidate(Candidate),
}
