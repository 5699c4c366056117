use crate::data::NormalData;
use crate::vote::{AffirmativeVote, Vote};

/// The most recent committed proposal this node has observed, together
/// with the quorum certificate that committed it.
///
/// `Candidate` is the parent for the next round's proposal. Equality is
/// by `data.id` alone: two candidates for the same data are the same
/// candidate even if their certificates differ (e.g. one carries a
/// superset of affirmative votes collected late).
#[derive(Clone, Debug)]
pub struct Candidate {
    /// The committed proposal.
    pub data: NormalData,
    /// The quorum certificate for `data`.
    pub votes: Vec<AffirmativeVote>,
}

impl Candidate {
    /// Build a new candidate from a committed proposal and its
    /// certificate.
    pub fn new(data: NormalData, votes: Vec<AffirmativeVote>) -> Self {
        Self { data, votes }
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.data.id == other.data.id
    }
}

impl Eq for Candidate {}

/// The result of a completed round: either a new candidate to adopt, or
/// a failure carrying whatever votes were cast.
///
/// Rather than giving `Candidate.data` an optional type just to
/// represent the failure case, the two outcomes are distinct enum
/// variants. See DESIGN.md.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The round produced a new candidate.
    Success(Candidate),
    /// The round failed: no `Data` can still reach quorum.
    Failure {
        /// Every vote cast before the round was declared a failure.
        votes: Vec<Vote>,
    },
}
