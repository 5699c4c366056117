use crate::{EpochError, ValidatorId};

/// Immutable descriptor of the validator set for an epoch (term).
///
/// `Epoch` is the only place the round layer learns who is in the
/// validator set and who proposes a given round; it never discovers
/// membership on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Epoch {
    /// The epoch number.
    pub num: u64,
    validators: Vec<ValidatorId>,
}

impl Epoch {
    /// Create a new epoch descriptor for the given validator set.
    ///
    /// The order of `validators` is significant: it determines the
    /// round-robin proposer schedule.
    pub fn new(num: u64, validators: Vec<ValidatorId>) -> Self {
        assert!(!validators.is_empty(), "epoch must have at least one validator");
        Self { num, validators }
    }

    /// The validator set, in proposer-schedule order.
    pub fn validators(&self) -> &[ValidatorId] {
        &self.validators
    }

    /// The quorum size: `⌊2n/3⌋+1` where `n` is the number of validators
    /// (the standard `2f+1` threshold for `n = 3f+1`).
    pub fn quorum(&self) -> usize {
        let n = self.validators.len();
        (2 * n) / 3 + 1
    }

    /// The validator that proposes the given round, by round-robin over
    /// the validator set.
    ///
    /// Rounds are numbered from 1 (round 0 is the synthetic genesis
    /// round and has no proposer of its own), so round 1 maps to the
    /// first validator in the set, round 2 to the second, and so on.
    pub fn proposer_id(&self, round_num: u32) -> ValidatorId {
        let index = (round_num.saturating_sub(1) as usize) % self.validators.len();
        self.validators[index]
    }

    /// Succeed iff `voter_id` is the proposer of `round_num`; otherwise
    /// fail with `InvalidProposer`.
    pub fn verify_proposer(&self, voter_id: &ValidatorId, round_num: u32) -> Result<(), EpochError> {
        let expected = self.proposer_id(round_num);
        if &expected == voter_id {
            Ok(())
        } else {
            Err(EpochError::InvalidProposer {
                expected,
                got: *voter_id,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(n: u8) -> ValidatorId {
        let mut bytes = [0u8; 20];
        bytes[19] = n;
        ValidatorId::new(bytes)
    }

    fn epoch_of_size(n: u8) -> Epoch {
        Epoch::new(1, (0..n).map(validator).collect())
    }

    #[test]
    fn quorum_is_the_floor_two_thirds_threshold() {
        assert_eq!(epoch_of_size(1).quorum(), 1);
        assert_eq!(epoch_of_size(3).quorum(), 3);
        assert_eq!(epoch_of_size(4).quorum(), 3);
        assert_eq!(epoch_of_size(7).quorum(), 5);
    }

    #[test]
    fn proposer_rotates_round_robin_starting_from_round_one() {
        let (a, b, c, d) = (validator(0), validator(1), validator(2), validator(3));
        let epoch = Epoch::new(1, vec![a, b, c, d]);

        assert_eq!(epoch.proposer_id(1), a);
        assert_eq!(epoch.proposer_id(2), b);
        assert_eq!(epoch.proposer_id(3), c);
        assert_eq!(epoch.proposer_id(4), d);
        assert_eq!(epoch.proposer_id(5), a, "schedule wraps after one full cycle");
        assert_eq!(epoch.proposer_id(0), a, "round 0 maps to the same index as round 1");
    }

    #[test]
    fn verify_proposer_accepts_only_the_scheduled_validator() {
        let (a, b) = (validator(0), validator(1));
        let epoch = Epoch::new(1, vec![a, b]);

        assert!(epoch.verify_proposer(&a, 1).is_ok());

        let err = epoch.verify_proposer(&b, 1).unwrap_err();
        assert_eq!(err, EpochError::InvalidProposer { expected: a, got: b });
    }
}
