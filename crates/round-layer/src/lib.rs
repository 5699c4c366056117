//! The per-round state machine of the round layer.
//!
//! `RoundLayer` drives a single `(epoch, round)` instance of
//! propose→vote→commit: it ingests `Data`/`Vote` messages, casts this
//! node's one vote per round, and emits broadcast/commit events for the
//! surrounding engine to act on.

#![forbid(unsafe_code)]
#![deny(unused_crate_dependencies, trivial_casts, trivial_numeric_casts)]
#![warn(missing_docs)]

mod input;
mod layer;
mod output;

pub use input::Input;
pub use layer::RoundLayer;
pub use output::{Output, RoundEnd};
