//! Core simulation module - pure, deterministic, and testable
//!
//! This module contains the full rules of the falling-pair puzzle: board
//! mechanics, move legality, chain elimination, and scoring. It has **zero
//! dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: identical inputs produce identical outcomes (a must,
//!   since drivers cross-check simulated boards against observed ones)
//! - **Testable**: every rule is pinned by unit tests
//! - **Portable**: runs headless, in a terminal harness, or under a bench
//! - **Fast**: zero-allocation hot paths for move application and search
//!
//! # Module Structure
//!
//! - [`board`]: 6x12 grid with drop, gravity, and placement legality
//! - [`chain`]: flood-fill group detection and obstacle clearing
//! - [`scoring`]: chain-power, color, and group bonus tables
//! - [`state`]: board + queue, move enumeration and application
//!
//! # Game Rules
//!
//! - A piece is a pair of colored cells dropped into one or two columns.
//! - After a drop, every maximal 4-connected same-color group of four or
//!   more cells clears; obstacles clear when touching a cleared cell.
//! - Cells fall column-locally to close gaps; clears triggered by falling
//!   cells chain, with a growing per-pass score multiplier.
//! - Dropping straight down onto a covered spawn column ends the game.
//!
//! # Example
//!
//! ```
//! use puyo_ai_core::{Board, PuyoState};
//! use puyo_ai_types::{Move, PuyoPair};
//!
//! let pair = PuyoPair::from_code("rg").unwrap();
//! let mut state = PuyoState::new(Board::new(), [pair]);
//!
//! // 22 candidate placements on an empty board.
//! assert_eq!(state.get_moves().len(), 22);
//!
//! // Commit one and inspect the outcome.
//! let outcome = state.apply_move(Move::new(pair, 0, 0)).unwrap();
//! assert!(!outcome.game_over);
//! assert_eq!(outcome.chains, 0);
//! ```

pub mod board;
pub mod chain;
pub mod scoring;
pub mod state;

pub use puyo_ai_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BOARD_SIZE};
pub use chain::{clear_groups, group_sizes, PassStats, MIN_GROUP_SIZE};
pub use scoring::{group_bonus, pass_score, CHAIN_POWER, COLOR_BONUS, GROUP_BONUS};
pub use state::{resolve_chains, PuyoState, Simulate, MAX_MOVES};
