//! Per-round message aggregation for the round layer.
//!
//! `RoundMessages` accumulates the `Data` and `Vote` messages seen
//! during a single `(epoch, round)` and determines when the round has
//! produced a new candidate or failed outright.

#![forbid(unsafe_code)]
#![deny(unused_crate_dependencies, trivial_casts, trivial_numeric_casts)]
#![warn(missing_docs)]

mod evidence;
mod messages;

pub use evidence::EvidenceMap;
pub use messages::{RoundMessages, RoundMessagesError};
