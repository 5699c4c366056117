//! Deterministic, non-cryptographic test fixtures for the round layer.
//!
//! Nothing in this crate is fit to ship in a production node: ids are
//! derived from a non-cryptographic hash of the message fields rather
//! than being content-addressed over a real serialization, and there is
//! no signing. It exists purely as a dev-dependency fixture crate,
//! never linked into a production binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod factory;
mod ids;

pub use factory::{
    affirmative_vote_from, none_vote_from, not_vote, FixtureDataVerifier, FixtureFactory,
    FixtureVoteVerifier,
};
pub use ids::{genesis, validator_id};
