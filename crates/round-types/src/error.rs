use crate::ValidatorId;

/// Error returned by `Epoch::verify_proposer` when the claimed proposer
/// does not match the round's round-robin schedule.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochError {
    /// The validator that produced a proposal is not the round's
    /// scheduled proposer.
    #[error("invalid proposer for round: expected {expected:?}, got {got:?}")]
    InvalidProposer {
        /// The validator the schedule expects.
        expected: ValidatorId,
        /// The validator that actually proposed.
        got: ValidatorId,
    },
}

/// Opaque error returned by a `DataFactory`/`VoteFactory`/`DataVerifier`/
/// `VoteVerifier` call.
///
/// The round layer never needs to distinguish *why* a capability call
/// failed — a signing failure, an I/O error reaching a mempool, and a
/// verifier rejecting a bad signature are all just "this message is
/// unusable"  to it. The underlying cause is preserved for logging.
#[derive(thiserror::Error, Debug)]
#[error("{context}: {source}")]
pub struct CapabilityError {
    context: &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl CapabilityError {
    /// Wrap `source` with a short static `context` tag describing which
    /// capability call failed.
    pub fn new(
        context: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            context,
            source: Box::new(source),
        }
    }
}
