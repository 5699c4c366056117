use roundbft_types::{
    AffirmativeVote, Candidate, Data, DataFactory, DataVerifier, Epoch, NormalData, ValidatorId,
    Vote, VoteFactory, VoteVerifier,
};
use roundbft_votekeeper::{RoundMessages, RoundMessagesError};

use crate::input::Input;
use crate::output::{Output, RoundEnd};

/// The per-round state machine: drives initialization, proposal, voting,
/// message ingestion, candidate updates, and emits round-end/broadcast
/// events.
///
/// Generic over the node's own `DataFactory`/`VoteFactory` — the pair
/// that knows how to build and verify this node's messages. There is
/// no internal locking: callers must serialize access, exactly as the
/// surrounding event loop serializes calls into a driver.
pub struct RoundLayer<DF, VF>
where
    DF: DataFactory,
    VF: VoteFactory,
{
    node_id: ValidatorId,
    data_factory: DF,
    vote_factory: VF,
    data_verifier: Option<DF::Verifier>,
    vote_verifier: Option<VF::Verifier>,
    epoch: Option<Epoch>,
    round_num: u32,
    candidate: Option<Candidate>,
    messages: Option<RoundMessages>,
    is_voted: bool,
    initialized: bool,
}

impl<DF, VF> RoundLayer<DF, VF>
where
    DF: DataFactory,
    VF: VoteFactory,
{
    /// Build an uninitialized round layer for `node_id`. No round is
    /// active until [`Self::initialize`] (or, equivalently,
    /// `handle(Input::Initialize { .. })`) is called.
    pub fn new(node_id: ValidatorId, data_factory: DF, vote_factory: VF) -> Self {
        Self {
            node_id,
            data_factory,
            vote_factory,
            data_verifier: None,
            vote_verifier: None,
            epoch: None,
            round_num: 0,
            candidate: None,
            messages: None,
            is_voted: false,
            initialized: false,
        }
    }

    /// The epoch this round layer is active in, once initialized.
    pub fn epoch(&self) -> Option<&Epoch> {
        self.epoch.as_ref()
    }

    /// The round currently active.
    pub fn round_num(&self) -> u32 {
        self.round_num
    }

    /// The most recently adopted candidate, once initialized.
    pub fn candidate(&self) -> Option<&Candidate> {
        self.candidate.as_ref()
    }

    /// True once this node has cast its one vote for the active round.
    pub fn is_voted(&self) -> bool {
        self.is_voted
    }

    /// Dispatch a single inbound event and return whatever outputs it
    /// raises, in emission order.
    pub async fn handle(&mut self, input: Input) -> Vec<Output> {
        match input {
            Input::Initialize {
                prev_epoch,
                epoch,
                round_num,
                candidate_data,
                candidate_votes,
            } => {
                self.initialize(prev_epoch, epoch, round_num, candidate_data, candidate_votes)
                    .await
            }
            Input::RoundStart { epoch, round_num } => self.round_start(epoch, round_num).await,
            Input::ReceiveData(data) => self.propose_data(data).await,
            Input::ReceiveVote(vote) => self.vote_data(vote).await,
            Input::ChangeCandidate(candidate) => self.change_candidate(candidate).await,
        }
    }

    /// Boot the round layer. Must be the first call ever made against a
    /// given instance; a second call is a programmer error (caught by
    /// `debug_assert!` in debug builds, left undefined in release, same
    /// as any other internal precondition this layer does not surface).
    pub async fn initialize(
        &mut self,
        _prev_epoch: Option<Epoch>,
        epoch: Epoch,
        round_num: u32,
        candidate_data: NormalData,
        candidate_votes: Vec<AffirmativeVote>,
    ) -> Vec<Output> {
        debug_assert!(!self.initialized, "initialize called twice on the same round layer");

        self.data_verifier = Some(self.data_factory.create_data_verifier());
        self.vote_verifier = Some(self.vote_factory.create_vote_verifier());
        self.candidate = Some(Candidate::new(candidate_data, candidate_votes));
        self.initialized = true;

        self.start_new_round(epoch, round_num).await
    }

    /// Transition to a new round, clearing this node's vote.
    pub async fn round_start(&mut self, epoch: Epoch, round_num: u32) -> Vec<Output> {
        debug_assert!(self.initialized, "round_start called before initialize");
        self.start_new_round(epoch, round_num).await
    }

    /// Ingest a `Data` message, from the network or as a broadcast
    /// loopback.
    pub async fn propose_data(&mut self, data: Data) -> Vec<Output> {
        debug_assert!(self.initialized, "propose_data called before initialize");

        let Some(messages) = self.messages.as_mut() else {
            return Vec::new();
        };

        if let Err(err) = messages.add_data(data.clone()) {
            tracing::trace!(%err, data_id = %data.id(), "dropped data");
            return Vec::new();
        }

        let mut outputs = Vec::new();
        if !self.is_voted {
            outputs.extend(self.verify_and_broadcast_vote(data).await);
        }
        outputs.extend(self.update_round_if_complete().await);
        outputs
    }

    /// Ingest a `Vote` message, from the network or as a broadcast
    /// loopback.
    pub async fn vote_data(&mut self, vote: Vote) -> Vec<Output> {
        debug_assert!(self.initialized, "vote_data called before initialize");

        let Some(messages) = self.messages.as_mut() else {
            return Vec::new();
        };

        if let Err(err) = messages.add_vote(vote) {
            match err {
                RoundMessagesError::AlreadyVoted(voter_id) => {
                    tracing::warn!(?voter_id, "equivocation detected");
                }
                other => tracing::trace!(%other, "dropped vote"),
            }
            return Vec::new();
        }

        self.update_round_if_complete().await
    }

    /// Accept (and possibly advance to) a candidate supplied out of
    /// band by the outer layer, e.g. learned via peer sync.
    pub async fn change_candidate(&mut self, candidate: Candidate) -> Vec<Output> {
        debug_assert!(self.initialized, "change_candidate called before initialize");

        let Some(epoch) = self.epoch.clone() else {
            return Vec::new();
        };

        let advances =
            candidate.data.epoch_num == epoch.num && candidate.data.round_num > self.round_num;

        if advances {
            let new_round_num = candidate.data.round_num;
            let mut outputs = vec![Output::ChangedCandidate {
                data: candidate.data.clone(),
                votes: candidate.votes.clone(),
            }];
            self.candidate = Some(candidate);
            outputs.extend(self.start_new_round(epoch, new_round_num).await);
            return outputs;
        }

        let completed = self.messages.as_ref().is_some_and(RoundMessages::is_completed);
        if completed {
            return Vec::new();
        }

        let event = Output::ChangedCandidate {
            data: candidate.data.clone(),
            votes: candidate.votes.clone(),
        };
        self.candidate = Some(candidate);
        vec![event]
    }

    /// Set `epoch`/`round_num`, construct a fresh `RoundMessages`, seed
    /// it with the round's `NoneData`, and propose if this node is the
    /// round's proposer.
    async fn start_new_round(&mut self, epoch: Epoch, round_num: u32) -> Vec<Output> {
        let quorum = epoch.quorum();
        let validator_count = epoch.validators().len();
        let proposer_id = epoch.proposer_id(round_num);

        let mut messages = RoundMessages::new(epoch.num, round_num, quorum, validator_count);

        match self
            .data_factory
            .create_none_data(epoch.num, round_num, proposer_id)
            .await
        {
            Ok(none_data) => {
                if let Err(err) = messages.add_data(Data::None(none_data)) {
                    tracing::warn!(%err, "failed to seed round with NoneData");
                }
            }
            Err(err) => tracing::warn!(error = %err, "data factory failed to build NoneData"),
        }

        tracing::debug!(epoch_num = epoch.num, round_num, %proposer_id, "round started");

        self.epoch = Some(epoch);
        self.round_num = round_num;
        self.messages = Some(messages);
        self.is_voted = false;

        self.create_data_if_proposer().await
    }

    /// If this node is the active round's proposer, build and broadcast
    /// a new proposal extending the current candidate.
    async fn create_data_if_proposer(&mut self) -> Vec<Output> {
        let (Some(epoch), Some(candidate)) = (self.epoch.as_ref(), self.candidate.as_ref()) else {
            return Vec::new();
        };

        if epoch.verify_proposer(&self.node_id, self.round_num).is_err() {
            return Vec::new();
        }

        let result = self
            .data_factory
            .create_data(
                candidate.data.number + 1,
                candidate.data.id,
                epoch.num,
                self.round_num,
                candidate.votes.clone(),
            )
            .await;

        let data = match result {
            Ok(data) => Data::Normal(data),
            Err(err) => {
                tracing::warn!(error = %err, "data factory failed to build a proposal");
                return Vec::new();
            }
        };

        vec![Output::BroadcastData(data.clone()), Output::ReceiveData(data)]
    }

    /// Cast this node's one vote for the round: affirmative if `data`
    /// passes verification, a `NoneVote` otherwise.
    async fn verify_and_broadcast_vote(&mut self, data: Data) -> Vec<Output> {
        let Some(epoch) = self.epoch.as_ref() else {
            return Vec::new();
        };
        let epoch_num = epoch.num;
        let round_num = self.round_num;
        let commit_id = match self.candidate.as_ref() {
            Some(candidate) => candidate.data.id,
            None => return Vec::new(),
        };

        let accept = self.verify_data(&data).await;

        let vote_result = if accept {
            self.vote_factory
                .create_vote(data.id(), commit_id, epoch_num, round_num)
                .await
        } else {
            self.vote_factory.create_none_vote(commit_id, epoch_num, round_num).await
        };

        let vote = match vote_result {
            Ok(vote) => vote,
            Err(err) => {
                tracing::warn!(error = %err, "vote factory failed to build a vote");
                return Vec::new();
            }
        };

        self.is_voted = true;
        vec![Output::BroadcastVote(vote.clone()), Output::ReceiveVote(vote)]
    }

    /// `_verify_data`: accept iff self-proposed, otherwise require a
    /// matching parent and a successful verifier call. `NoneData` is
    /// never voted affirmatively and a parent mismatch never reaches
    /// the verifier at all.
    async fn verify_data(&self, data: &Data) -> bool {
        if data.proposer_id() == &self.node_id {
            return true;
        }

        let Some(candidate) = self.candidate.as_ref() else {
            return false;
        };

        if data.prev_id() != Some(candidate.data.id) {
            return false;
        }

        if data.is_not() {
            return false;
        }

        let Data::Normal(normal) = data else {
            return false;
        };
        let Some(verifier) = self.data_verifier.as_ref() else {
            return false;
        };

        match verifier.verify(normal).await {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(error = %err, "data verification failed, voting None");
                false
            }
        }
    }

    /// Attempt to finalize the round; on success, raise `RoundEnd` and
    /// adopt the new candidate.
    async fn update_round_if_complete(&mut self) -> Vec<Output> {
        let Some(messages) = self.messages.as_mut() else {
            return Vec::new();
        };

        match messages.complete() {
            Ok(()) => {}
            Err(RoundMessagesError::AlreadyCompleted) | Err(RoundMessagesError::CannotComplete) => {
                return Vec::new();
            }
            Err(err @ RoundMessagesError::AlreadyVoted(_)) => {
                tracing::warn!(%err, "unexpected error completing round");
                return Vec::new();
            }
        }

        let outcome = messages
            .result()
            .cloned()
            .expect("result is set once complete() succeeds");

        self.raise_round_end(outcome)
    }

    /// Build the `RoundEnd` output for a completed round and, on
    /// success, adopt the new candidate.
    fn raise_round_end(&mut self, outcome: roundbft_types::RoundOutcome) -> Vec<Output> {
        use roundbft_types::RoundOutcome;

        let epoch_num = self.epoch.as_ref().map_or(0, |e| e.num);
        let round_num = self.round_num;

        let event = match outcome {
            RoundOutcome::Success(candidate) => {
                let commit_id = candidate.data.prev_id;
                let event = RoundEnd {
                    is_success: true,
                    epoch_num,
                    round_num,
                    candidate_data: Some(candidate.data.clone()),
                    candidate_votes: candidate
                        .votes
                        .iter()
                        .cloned()
                        .map(Vote::Affirmative)
                        .collect(),
                    commit_id: Some(commit_id),
                };
                self.candidate = Some(candidate);
                event
            }
            RoundOutcome::Failure { votes } => RoundEnd {
                is_success: false,
                epoch_num,
                round_num,
                candidate_data: None,
                candidate_votes: votes,
                commit_id: None,
            },
        };

        tracing::debug!(epoch_num, round_num, is_success = event.is_success, "round ended");
        vec![Output::RoundEnd(event)]
    }
}
