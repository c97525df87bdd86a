//! Turn loop with a built-in prediction cross-check
//!
//! The driver plays a policy against a game source. Each turn it also
//! re-simulates the committed move on its own copy of the state, and on the
//! next observation compares the board the source shows with the board the
//! engine predicted. A mismatch means the source and the engine disagree
//! about the rules; it is counted and dumped to stderr rather than treated
//! as fatal.

use anyhow::Result;
use serde::Serialize;

use puyo_ai_core::{Board, PuyoState};
use puyo_ai_policy::Policy;
use puyo_ai_types::Move;

use crate::source::GameSource;
use crate::transcript::TurnRecord;

/// Tally of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub turns: u32,
    pub score: u64,
    pub best_chain: u32,
    pub cells_cleared: u64,
    pub divergences: u32,
    pub game_over: bool,
}

/// The last committed move and the board it should leave behind
#[derive(Debug, Clone)]
struct Prediction {
    mv: Move,
    before: Board,
    after: Board,
}

pub struct Driver<S, P> {
    source: S,
    policy: P,
    prediction: Option<Prediction>,
    stats: RunStats,
}

impl<S: GameSource, P: Policy<PuyoState>> Driver<S, P> {
    pub fn new(source: S, policy: P) -> Self {
        Self {
            source,
            policy,
            prediction: None,
            stats: RunStats::default(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// One turn: observe, verify the last prediction, decide, commit.
    ///
    /// `None` means the policy had no move to offer. A committed move that
    /// fails to apply is an error; the policy only chooses among legal
    /// moves, so the source must have drifted from the observed state.
    pub fn step(&mut self) -> Result<Option<TurnRecord>> {
        let state = self.source.get_state();
        let diverged = self.check_prediction(&state);

        let Some(mv) = self.policy.decide(&state) else {
            return Ok(None);
        };

        let mut predicted = state.clone();
        predicted.apply_move(mv)?;
        let outcome = self.source.perform_move(mv)?;

        self.prediction = Some(Prediction {
            mv,
            before: state.board().clone(),
            after: predicted.board().clone(),
        });

        self.stats.turns += 1;
        self.stats.score += u64::from(outcome.score);
        self.stats.best_chain = self.stats.best_chain.max(outcome.chains);
        self.stats.cells_cleared += u64::from(outcome.cells_cleared);
        self.stats.game_over |= outcome.game_over;

        Ok(Some(TurnRecord {
            turn: self.stats.turns,
            pair: mv.pair.code(),
            orientation: mv.orientation,
            x: mv.x,
            score: outcome.score,
            chains: outcome.chains,
            cells_cleared: outcome.cells_cleared,
            total_score: self.stats.score,
            game_over: outcome.game_over,
            diverged,
        }))
    }

    /// Play until the game ends, the policy runs dry, or `max_turns` is hit
    pub fn play(&mut self, max_turns: u32) -> Result<RunStats> {
        while self.stats.turns < max_turns && !self.stats.game_over {
            if self.step()?.is_none() {
                break;
            }
        }
        Ok(self.stats)
    }

    fn check_prediction(&mut self, state: &PuyoState) -> bool {
        let Some(prediction) = self.prediction.take() else {
            return false;
        };
        if prediction.after == *state.board() {
            return false;
        }
        self.stats.divergences += 1;
        eprintln!("move performed incorrectly");
        eprintln!("move: {:?}", prediction.mv);
        eprintln!("before:\n{}", prediction.before);
        eprintln!("expected:\n{}", prediction.after);
        eprintln!("actual:\n{}", state.board());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SimulatedGame;
    use puyo_ai_policy::{GreedyPolicy, RandomPolicy};
    use puyo_ai_types::{Cell, EngineError, MoveOutcome, PuyoColor, PuyoPair};

    #[test]
    fn test_play_runs_the_requested_turns() {
        let mut driver = Driver::new(SimulatedGame::new(5), RandomPolicy::new(5));
        let stats = driver.play(10).unwrap();
        assert_eq!(stats.turns, 10);
        assert_eq!(stats.divergences, 0);
        assert!(!stats.game_over);
    }

    #[test]
    fn test_step_reports_the_committed_move() {
        let mut driver = Driver::new(SimulatedGame::new(5), RandomPolicy::new(5));
        let head = driver.source().get_state().peek().unwrap();

        let record = driver.step().unwrap().unwrap();
        assert_eq!(record.turn, 1);
        assert_eq!(record.pair, head.code());
        assert!(!record.diverged);
    }

    /// Replays the head pair forever against a fixed red floor, so the
    /// first committed move is guaranteed to clear.
    struct LoopSource {
        state: PuyoState,
    }

    impl LoopSource {
        fn new() -> Self {
            let mut board = Board::new();
            for x in 1..4 {
                board.set(x, 0, Cell::Color(PuyoColor::Red));
            }
            let rr = PuyoPair::from_code("rr").unwrap();
            Self {
                state: PuyoState::new(board, [rr]),
            }
        }
    }

    impl GameSource for LoopSource {
        fn get_state(&self) -> PuyoState {
            self.state.clone()
        }

        fn perform_move(&mut self, mv: Move) -> Result<MoveOutcome, EngineError> {
            let outcome = self.state.apply_move(mv)?;
            self.state.pop_pair();
            self.state
                .push_pair(PuyoPair::from_code("rr").unwrap());
            Ok(outcome)
        }
    }

    #[test]
    fn test_stats_accumulate_scores_and_chains() {
        let mut driver = Driver::new(LoopSource::new(), GreedyPolicy::new(1));
        let stats = driver.play(2).unwrap();
        assert_eq!(stats.turns, 2);
        assert!(stats.score >= 100);
        assert!(stats.best_chain >= 1);
        assert!(stats.cells_cleared >= 5);
        assert_eq!(stats.divergences, 0);
    }

    /// Tampers with every observation after the first commit
    struct Desynced {
        inner: SimulatedGame,
        tampered: bool,
    }

    impl GameSource for Desynced {
        fn get_state(&self) -> PuyoState {
            let state = self.inner.get_state();
            if !self.tampered {
                return state;
            }
            let mut board = state.board().clone();
            board.set(5, 11, Cell::Obstacle);
            PuyoState::new(board, state.queue().iter().copied())
        }

        fn perform_move(&mut self, mv: Move) -> Result<MoveOutcome, EngineError> {
            let outcome = self.inner.perform_move(mv)?;
            self.tampered = true;
            Ok(outcome)
        }
    }

    #[test]
    fn test_divergence_is_detected_and_counted() {
        let source = Desynced {
            inner: SimulatedGame::new(3),
            tampered: false,
        };
        let mut driver = Driver::new(source, RandomPolicy::new(3));
        let stats = driver.play(3).unwrap();
        assert_eq!(stats.turns, 3);
        assert!(stats.divergences >= 1);
    }

    #[test]
    fn test_driver_and_bare_engine_agree() {
        let mut driver = Driver::new(SimulatedGame::new(9), RandomPolicy::new(9));
        let mut shadow = driver.source().get_state();

        for _ in 0..8 {
            let record = driver.step().unwrap().unwrap();
            let pair = shadow.peek().unwrap();
            assert_eq!(record.pair, pair.code());
            let outcome = shadow
                .apply_move(Move::new(pair, record.orientation, record.x))
                .unwrap();
            assert_eq!(outcome.score, record.score);
            shadow.pop_pair();
            let refreshed = driver.source().get_state();
            assert_eq!(shadow.board(), refreshed.board());
            shadow = refreshed;
        }
    }
}
