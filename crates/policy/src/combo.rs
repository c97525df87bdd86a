//! Chain-building heuristic

use puyo_ai_core::{resolve_chains, PuyoState};
use puyo_ai_types::{Cell, Move, PuyoColor, BOARD_WIDTH};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::base::{best_scored, Policy};
use crate::greedy::connectivity;

/// Fill level above which sitting on a chain stops being worth the risk
const PRESSURE_FILL: u32 = 36;

/// Any column reaching this row leaves no room for the next piece
const DANGER_ROW: i8 = 10;

/// Builds multi-pass chains instead of cashing in single clears.
///
/// Each candidate is tried on a throwaway copy, then the board is probed
/// with every color dropped into every column; probes that would set off two
/// or more passes count their score as latent value. Clears that do not
/// chain are discounted, and once the board fills past half (or the spawn
/// column grows tall) immediate points are weighted back up.
#[derive(Debug, Clone)]
pub struct ComboPolicy {
    rng: SmallRng,
}

impl ComboPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Policy<PuyoState> for ComboPolicy {
    fn decide(&mut self, state: &PuyoState) -> Option<Move> {
        best_scored(&mut self.rng, state, score_move)
    }
}

fn score_move(mut state: PuyoState, mv: Move) -> f64 {
    let Ok(outcome) = state.apply_move(mv) else {
        return f64::NEG_INFINITY;
    };
    let score = f64::from(outcome.score);
    let mut value = 0.0;

    // Latent chains: a single well-placed cell firing two passes means the
    // groundwork is already on the board.
    for color in PuyoColor::ALL {
        for x in 0..BOARD_WIDTH {
            let mut probe = state.board().clone();
            if probe.drop_cell(x, Cell::Color(color)).is_err() {
                continue;
            }
            let result = resolve_chains(&mut probe);
            if result.chains >= 2 {
                value += f64::from(result.score);
            }
        }
    }

    // Spending the turn on a clear that does not chain wastes groundwork.
    if outcome.chains < 2 {
        value -= score;
    } else if outcome.chains > 2 {
        value += 2.0 * score;
    }

    value += connectivity(&state);

    let filled = state.board().filled_cells();
    if filled > PRESSURE_FILL || state.board().is_filled(2, 9) {
        value += 4.0 * score;
    }
    for x in 0..BOARD_WIDTH as i8 {
        if state.board().is_filled(x, DANGER_ROW) {
            return f64::NEG_INFINITY;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use puyo_ai_core::Board;
    use puyo_ai_types::PuyoPair;

    fn pair(code: &str) -> PuyoPair {
        PuyoPair::from_code(code).unwrap()
    }

    /// Greens under a red ledge: one red into column 3 fires a two-pass
    /// chain (five reds, then the four greens that land together).
    fn primed_board() -> Board {
        let mut board = Board::new();
        let cells = [
            (0, 2, PuyoColor::Green),
            (0, 1, PuyoColor::Red),
            (1, 1, PuyoColor::Red),
            (2, 1, PuyoColor::Red),
            (0, 0, PuyoColor::Green),
            (1, 0, PuyoColor::Green),
            (2, 0, PuyoColor::Green),
            (3, 0, PuyoColor::Red),
        ];
        for (x, y, color) in cells {
            board.set(x, y, Cell::Color(color));
        }
        board
    }

    #[test]
    fn test_probe_values_groundwork() {
        let state = PuyoState::new(primed_board(), [pair("bb")]);

        // Column 5 keeps the red trigger slot open; column 3 buries it.
        let keeps = score_move(state.clone(), Move::new(pair("bb"), 0, 5));
        let buries = score_move(state.clone(), Move::new(pair("bb"), 0, 3));
        assert!(keeps > buries);
    }

    #[test]
    fn test_decides_to_keep_the_trigger_open() {
        let state = PuyoState::new(primed_board(), [pair("bb")]);
        let mut policy = ComboPolicy::new(9);

        for _ in 0..10 {
            let mv = policy.decide(&state).unwrap();
            let mut copy = state.clone();
            copy.apply_move(mv).unwrap();

            let mut probe = copy.board().clone();
            probe.drop_cell(3, Cell::Color(PuyoColor::Red)).unwrap();
            assert_eq!(resolve_chains(&mut probe).chains, 2);
        }
    }

    #[test]
    fn test_tall_stack_near_the_top_is_poison() {
        let mut board = Board::new();
        for _ in 0..11 {
            board.drop_cell(5, Cell::Obstacle).unwrap();
        }
        let state = PuyoState::new(board, [pair("rg")]);

        let value = score_move(state.clone(), Move::new(pair("rg"), 0, 0));
        assert_eq!(value, f64::NEG_INFINITY);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let state = PuyoState::new(Board::new(), [pair("rg")]);
        let mut a = ComboPolicy::new(11);
        let mut b = ComboPolicy::new(11);
        for _ in 0..10 {
            assert_eq!(a.decide(&state), b.decide(&state));
        }
    }
}
