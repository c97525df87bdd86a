//! Uniform random play

use puyo_ai_core::Simulate;
use puyo_ai_types::Move;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::base::Policy;

/// Picks uniformly among the legal moves. The baseline every heuristic has
/// to beat.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<S: Simulate> Policy<S> for RandomPolicy {
    fn decide(&mut self, state: &S) -> Option<Move> {
        let moves = state.get_moves();
        moves.choose(&mut self.rng).copied()
    }
}
