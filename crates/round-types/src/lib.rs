//! Core data model and capability interfaces for the round layer of a
//! leader-based BFT consensus engine.
//!
//! This crate defines the immutable message types (`Data`, `Vote`), the
//! `Epoch`/`Candidate` value types, and the `DataFactory`/`VoteFactory`
//! capability traits that let the round layer create and validate
//! messages without knowing anything about signing or payload
//! construction.

#![forbid(unsafe_code)]
#![deny(unused_crate_dependencies, trivial_casts, trivial_numeric_casts)]
#![warn(missing_docs)]

mod candidate;
mod capability;
mod data;
mod epoch;
mod error;
mod ids;
mod vote;

pub use candidate::{Candidate, RoundOutcome};
pub use capability::{DataFactory, DataVerifier, VoteFactory, VoteVerifier};
pub use data::{Data, NoneData, NormalData};
pub use epoch::Epoch;
pub use error::{CapabilityError, EpochError};
pub use ids::{DataId, ValidatorId, VoteId};
pub use vote::{AffirmativeVote, NoneVote, NotVote, Vote};
