//! Game sources - the authoritative side a driver plays against

use puyo_ai_core::{Board, PuyoState};
use puyo_ai_types::{EngineError, Move, MoveOutcome, PuyoColor, PuyoPair, QUEUE_LEN};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Owner of the real game state: observations come out, committed moves go
/// in.
///
/// `get_state` hands back a deep copy; callers may mutate and discard it
/// without touching the source. `perform_move` is the only way to change
/// the authoritative state, and it also advances the piece queue.
pub trait GameSource {
    fn get_state(&self) -> PuyoState;
    fn perform_move(&mut self, mv: Move) -> Result<MoveOutcome, EngineError>;
}

/// Seeded piece generator; both cells drawn uniformly over the five colors
#[derive(Debug, Clone)]
pub struct PairGen {
    rng: SmallRng,
}

impl PairGen {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn draw(&mut self) -> PuyoPair {
        let axis = PuyoColor::ALL[self.rng.gen_range(0..PuyoColor::ALL.len())];
        let child = PuyoColor::ALL[self.rng.gen_range(0..PuyoColor::ALL.len())];
        PuyoPair::new(axis, child)
    }
}

/// In-process game: an empty board and a seeded queue, advanced move by
/// move.
///
/// The queue always holds [`QUEUE_LEN`] pieces; committing a move consumes
/// the head and draws a replacement, so the preview depth never changes.
#[derive(Debug, Clone)]
pub struct SimulatedGame {
    state: PuyoState,
    pairs: PairGen,
}

impl SimulatedGame {
    pub fn new(seed: u64) -> Self {
        let mut pairs = PairGen::new(seed);
        let queue: Vec<PuyoPair> = (0..QUEUE_LEN).map(|_| pairs.draw()).collect();
        Self {
            state: PuyoState::new(Board::new(), queue),
            pairs,
        }
    }
}

impl GameSource for SimulatedGame {
    fn get_state(&self) -> PuyoState {
        self.state.clone()
    }

    fn perform_move(&mut self, mv: Move) -> Result<MoveOutcome, EngineError> {
        let outcome = self.state.apply_move(mv)?;
        self.state.pop_pair();
        self.state.push_pair(self.pairs.draw());
        Ok(outcome)
    }
}
