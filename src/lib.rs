//! Puyo AI (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them so binaries, integration tests, and benchmarks can reach
//! everything through `puyo_ai::{core,policy,runner,term,types}`.

pub use puyo_ai_core as core;
pub use puyo_ai_policy as policy;
pub use puyo_ai_runner as runner;
pub use puyo_ai_term as term;
pub use puyo_ai_types as types;
