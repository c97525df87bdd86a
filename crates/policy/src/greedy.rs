//! One-ply greedy scoring

use puyo_ai_core::{group_sizes, PuyoState};
use puyo_ai_types::Move;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::base::{best_scored, Policy};

/// One-ply lookahead that cashes in any clear it can see and otherwise herds
/// same-colored cells together.
///
/// Each candidate is scored on a throwaway copy: the points the move earns
/// right away, plus the squared size of every color group left on the board.
/// The square rewards growing one near-complete group over scattering pairs.
/// A move that covers the spawn cell scores negative infinity.
#[derive(Debug, Clone)]
pub struct GreedyPolicy {
    rng: SmallRng,
}

impl GreedyPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Policy<PuyoState> for GreedyPolicy {
    fn decide(&mut self, state: &PuyoState) -> Option<Move> {
        best_scored(&mut self.rng, state, score_move)
    }
}

fn score_move(mut state: PuyoState, mv: Move) -> f64 {
    let Ok(outcome) = state.apply_move(mv) else {
        return f64::NEG_INFINITY;
    };
    let mut value = 0.0;
    if outcome.cells_cleared > 0 {
        value += f64::from(outcome.score);
    }
    value += connectivity(&state);
    if state.is_spawn_blocked() {
        return f64::NEG_INFINITY;
    }
    value
}

/// Sum of squared group sizes; each group of n cells contributes n for every
/// cell in it.
pub(crate) fn connectivity(state: &PuyoState) -> f64 {
    group_sizes(state.board())
        .into_iter()
        .map(|size| f64::from(size) * f64::from(size))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use puyo_ai_core::Board;
    use puyo_ai_types::{Cell, PuyoColor, PuyoPair};

    fn pair(code: &str) -> PuyoPair {
        PuyoPair::from_code(code).unwrap()
    }

    /// A floor with three reds in a row and one green in the corner
    fn red_floor() -> Board {
        let mut board = Board::new();
        board.set(0, 0, Cell::Color(PuyoColor::Green));
        for x in 1..4 {
            board.set(x, 0, Cell::Color(PuyoColor::Red));
        }
        board
    }

    #[test]
    fn test_takes_the_clear_when_one_is_available() {
        let state = PuyoState::new(red_floor(), [pair("rr")]);
        let mut policy = GreedyPolicy::new(3);

        for _ in 0..10 {
            let mv = policy.decide(&state).unwrap();
            let mut copy = state.clone();
            let outcome = copy.apply_move(mv).unwrap();
            assert!(outcome.cells_cleared >= 4);
        }
    }

    #[test]
    fn test_scoring_prefers_connection_over_scatter() {
        let mut board = Board::new();
        board.set(0, 0, Cell::Color(PuyoColor::Blue));
        let state = PuyoState::new(board, [pair("bb")]);

        let stacked = score_move(state.clone(), Move::new(pair("bb"), 0, 0));
        let scattered = score_move(state.clone(), Move::new(pair("bb"), 0, 4));
        assert!(stacked > scattered);
    }

    #[test]
    fn test_burying_the_spawn_scores_negative_infinity() {
        // Column 2 is two cells short of the top; a vertical drop there
        // covers the spawn cell.
        let mut board = Board::new();
        for _ in 0..10 {
            board.drop_cell(2, Cell::Obstacle).unwrap();
        }
        let state = PuyoState::new(board, [pair("rg")]);

        let value = score_move(state.clone(), Move::new(pair("rg"), 0, 2));
        assert_eq!(value, f64::NEG_INFINITY);

        let mut policy = GreedyPolicy::new(0);
        for _ in 0..10 {
            let mv = policy.decide(&state).unwrap();
            let mut copy = state.clone();
            copy.apply_move(mv).unwrap();
            assert!(!copy.is_spawn_blocked());
        }
    }

    #[test]
    fn test_same_seed_same_choices() {
        let state = PuyoState::new(Board::new(), [pair("rg")]);
        let mut a = GreedyPolicy::new(11);
        let mut b = GreedyPolicy::new(11);
        for _ in 0..10 {
            assert_eq!(a.decide(&state), b.decide(&state));
        }
    }
}
