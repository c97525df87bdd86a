//! Run loop - plays a policy against a game source
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`source`] | [`GameSource`] trait and the in-process [`SimulatedGame`] |
//! | [`driver`] | turn loop, run statistics, prediction cross-check |
//! | [`transcript`] | JSONL record of every committed move |
//!
//! The driver never trusts the source: each committed move is re-simulated
//! locally and the next observation is checked against the predicted board.
//! Against [`SimulatedGame`] the check is vacuous; against an external game
//! it is how rule drift gets caught.

pub mod driver;
pub mod source;
pub mod transcript;

pub use driver::{Driver, RunStats};
pub use source::{GameSource, PairGen, SimulatedGame};
pub use transcript::{TranscriptSink, TurnRecord};
