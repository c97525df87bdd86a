//! Decision interface shared by every player

use puyo_ai_core::{PuyoState, Simulate};
use puyo_ai_types::Move;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Chooses the next move for a state, or `None` when no move is legal.
///
/// `&mut self` admits stateful implementations such as seeded random number
/// generators; `decide` must still leave `state` untouched.
pub trait Policy<S: Simulate> {
    fn decide(&mut self, state: &S) -> Option<Move>;
}

impl<S: Simulate, P: Policy<S> + ?Sized> Policy<S> for Box<P> {
    fn decide(&mut self, state: &S) -> Option<Move> {
        (**self).decide(state)
    }
}

/// Clone-and-score selection: try every legal move on a throwaway copy of
/// the state, keep the best.
///
/// Moves are shuffled first so exact ties resolve uniformly at random
/// instead of by enumeration order. `score` consumes its copy and may leave
/// it in any shape; `f64::NEG_INFINITY` marks a move as never acceptable.
pub(crate) fn best_scored<F>(rng: &mut SmallRng, state: &PuyoState, mut score: F) -> Option<Move>
where
    F: FnMut(PuyoState, Move) -> f64,
{
    let mut moves = state.get_moves();
    moves.as_mut_slice().shuffle(rng);
    moves
        .into_iter()
        .map(|mv| (mv, score(state.clone(), mv)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(mv, _)| mv)
}
