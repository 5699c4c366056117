use pretty_assertions::assert_eq;

use roundbft_test::{affirmative_vote_from, none_vote_from, not_vote, validator_id};
use roundbft_types::{Data, DataId, NoneData, NormalData, RoundOutcome};
use roundbft_votekeeper::{RoundMessages, RoundMessagesError};

const GENESIS: DataId = DataId::new([0; 32]);

fn normal_data(id: [u8; 32], proposer: u8) -> NormalData {
    NormalData {
        id: DataId::new(id),
        prev_id: GENESIS,
        proposer_id: validator_id(proposer),
        epoch_num: 1,
        round_num: 1,
        number: 1,
        prev_votes: Vec::new(),
    }
}

fn none_data() -> NoneData {
    NoneData {
        id: DataId::new([0xff; 32]),
        proposer_id: validator_id(0),
        epoch_num: 1,
        round_num: 1,
    }
}

/// n=4 validators, quorum = floor(8/3)+1 = 3. Passed explicitly rather
/// than re-derived here; `Epoch::quorum()`'s own arithmetic is covered
/// separately by `roundbft-types::epoch::tests`.
fn messages_n4_q3() -> RoundMessages {
    RoundMessages::new(1, 1, 3, 4)
}

#[test]
fn add_data_is_idempotent_on_duplicates() {
    let mut messages = messages_n4_q3();
    let data = normal_data([1; 32], 0);

    messages.add_data(Data::Normal(data.clone())).unwrap();
    messages.add_data(Data::Normal(data.clone())).unwrap();

    assert_eq!(messages.datas().len(), 1);
}

#[test]
fn add_vote_is_idempotent_on_exact_duplicates() {
    let mut messages = messages_n4_q3();
    let data_id = DataId::new([1; 32]);
    let vote = affirmative_vote_from(validator_id(0), data_id, GENESIS, 1, 1);

    messages.add_vote(vote.clone()).unwrap();
    messages.add_vote(vote).unwrap();

    assert_eq!(messages.votes().len(), 1);
}

#[test]
fn second_differing_vote_from_same_voter_is_equivocation() {
    let mut messages = messages_n4_q3();
    let voter = validator_id(2);
    let d1 = DataId::new([1; 32]);
    let d2 = DataId::new([2; 32]);

    messages
        .add_vote(affirmative_vote_from(voter, d1, GENESIS, 1, 1))
        .unwrap();

    let err = messages
        .add_vote(affirmative_vote_from(voter, d2, GENESIS, 1, 1))
        .unwrap_err();

    assert_eq!(err, RoundMessagesError::AlreadyVoted(voter));
    assert_eq!(messages.votes().len(), 1);
    // The first vote seen still counts.
    assert_eq!(messages.votes()[&voter].data_id(), Some(d1));
    assert!(!messages.evidence().is_empty());
}

#[test]
fn exactly_q_minus_one_cannot_complete_then_qth_succeeds() {
    let mut messages = messages_n4_q3();
    let data = normal_data([1; 32], 0);
    messages.add_data(Data::Normal(data.clone())).unwrap();

    messages
        .add_vote(affirmative_vote_from(validator_id(0), data.id, GENESIS, 1, 1))
        .unwrap();
    messages
        .add_vote(affirmative_vote_from(validator_id(1), data.id, GENESIS, 1, 1))
        .unwrap();

    assert_eq!(messages.complete(), Err(RoundMessagesError::CannotComplete));

    messages
        .add_vote(affirmative_vote_from(validator_id(2), data.id, GENESIS, 1, 1))
        .unwrap();

    messages.complete().unwrap();
    assert!(messages.is_completed());

    match messages.result().unwrap() {
        RoundOutcome::Success(candidate) => assert_eq!(candidate.data.id, data.id),
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn split_votes_that_exclude_every_data_fail_the_round() {
    let mut messages = messages_n4_q3();

    // With n=4, quorum=3: after 1 NoneVote, 3 voters remain, enough to
    // still reach quorum for some Data.
    messages
        .add_vote(none_vote_from(validator_id(0), GENESIS, 1, 1))
        .unwrap();
    assert_eq!(messages.complete(), Err(RoundMessagesError::CannotComplete));

    // A 2nd NoneVote leaves only 2 voters, which can no longer reach
    // quorum for any Data: the round fails right here.
    messages
        .add_vote(none_vote_from(validator_id(1), GENESIS, 1, 1))
        .unwrap();

    messages.complete().unwrap();
    match messages.result().unwrap() {
        RoundOutcome::Failure { votes } => assert_eq!(votes.len(), 2),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn not_votes_also_count_toward_exclusion() {
    let mut messages = messages_n4_q3();

    messages
        .add_vote(not_vote(validator_id(0), GENESIS, 1, 1))
        .unwrap();
    messages
        .add_vote(not_vote(validator_id(1), GENESIS, 1, 1))
        .unwrap();
    messages
        .add_vote(not_vote(validator_id(2), GENESIS, 1, 1))
        .unwrap();

    messages.complete().unwrap();
    assert!(matches!(messages.result(), Some(RoundOutcome::Failure { .. })));
}

#[test]
fn once_completed_no_further_mutation_is_possible() {
    let mut messages = messages_n4_q3();
    let data = normal_data([1; 32], 0);
    messages.add_data(Data::Normal(data.clone())).unwrap();
    for i in 0..3 {
        messages
            .add_vote(affirmative_vote_from(validator_id(i), data.id, GENESIS, 1, 1))
            .unwrap();
    }
    messages.complete().unwrap();

    assert_eq!(
        messages.add_data(Data::Normal(normal_data([9; 32], 1))),
        Err(RoundMessagesError::AlreadyCompleted)
    );
    assert_eq!(
        messages.add_vote(affirmative_vote_from(validator_id(3), data.id, GENESIS, 1, 1)),
        Err(RoundMessagesError::AlreadyCompleted)
    );
    assert_eq!(messages.complete(), Err(RoundMessagesError::AlreadyCompleted));
}

#[test]
fn tie_break_picks_lexicographically_smallest_data_id() {
    let mut messages = RoundMessages::new(1, 1, 2, 4);
    let low = normal_data([1; 32], 0);
    let high = normal_data([2; 32], 1);
    messages.add_data(Data::Normal(low.clone())).unwrap();
    messages.add_data(Data::Normal(high.clone())).unwrap();

    // Two validators vote for `high`, two for `low`: both reach the
    // quorum of 2 "simultaneously" (on the same incoming batch).
    messages
        .add_vote(affirmative_vote_from(validator_id(0), low.id, GENESIS, 1, 1))
        .unwrap();
    messages
        .add_vote(affirmative_vote_from(validator_id(1), low.id, GENESIS, 1, 1))
        .unwrap();
    messages
        .add_vote(affirmative_vote_from(validator_id(2), high.id, GENESIS, 1, 1))
        .unwrap();
    messages
        .add_vote(affirmative_vote_from(validator_id(3), high.id, GENESIS, 1, 1))
        .unwrap();

    messages.complete().unwrap();
    match messages.result().unwrap() {
        RoundOutcome::Success(candidate) => assert_eq!(candidate.data.id, low.id),
        other => panic!("expected success, got {other:?}"),
    }
}

#[test]
fn affirmative_votes_for_none_data_never_count_toward_quorum() {
    let mut messages = messages_n4_q3();
    let placeholder = none_data();
    messages.add_data(Data::None(placeholder.clone())).unwrap();

    for i in 0..4 {
        // A byzantine validator claims to vote affirmatively for the
        // NoneData's id; this must never be able to reach quorum.
        messages
            .add_vote(affirmative_vote_from(validator_id(i), placeholder.id, GENESIS, 1, 1))
            .unwrap();
    }

    messages.complete().unwrap();
    assert!(matches!(messages.result(), Some(RoundOutcome::Failure { .. })));
}
