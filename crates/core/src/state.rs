//! Game state - board plus upcoming-piece queue, and the move life cycle
//!
//! `PuyoState` is the unit of speculation: policies clone it, try moves on
//! the clones, and commit exactly one move on the authoritative copy.
//! `apply_move` is the sole mutator. It validates the move, drops the pair,
//! then runs elimination passes with gravity in between until the board is
//! stable, accumulating score per pass.
//!
//! Committing does not advance the queue; the game source owns that step, so
//! a cloned state can replay the same head piece any number of ways.

use std::collections::VecDeque;
use std::fmt;

use arrayvec::ArrayVec;

use puyo_ai_types::{
    Cell, EngineError, Move, MoveOutcome, PuyoPair, BOARD_HEIGHT, BOARD_WIDTH, ORIENTATION_COUNT,
    SPAWN_COLUMN,
};

use crate::board::Board;
use crate::chain::clear_groups;
use crate::scoring::pass_score;

/// Upper bound on legal moves from any position (6 + 5 + 6 + 5)
pub const MAX_MOVES: usize = 22;

/// Elimination passes allowed per move. Correct gravity stabilizes a 6x12
/// board long before this; the cap bounds the loop on corrupt input.
const MAX_CHAIN_PASSES: u32 = 25;

const TOP_ROW: i8 = BOARD_HEIGHT as i8 - 1;

/// The capability surface policies and drivers speculate through: deep
/// cloning, legal-move enumeration, and move application.
pub trait Simulate: Clone {
    /// Every legal move for the queue-head piece, bounded and restartable.
    fn get_moves(&self) -> ArrayVec<Move, MAX_MOVES>;

    /// Apply one move in place, resolving chains, and report the outcome.
    fn apply_move(&mut self, mv: Move) -> Result<MoveOutcome, EngineError>;
}

/// A full game observation: board contents plus the upcoming-piece queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuyoState {
    board: Board,
    queue: VecDeque<PuyoPair>,
}

impl PuyoState {
    pub fn new(board: Board, queue: impl IntoIterator<Item = PuyoPair>) -> Self {
        Self {
            board,
            queue: queue.into_iter().collect(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn queue(&self) -> &VecDeque<PuyoPair> {
        &self.queue
    }

    /// The currently controllable piece, if any
    pub fn peek(&self) -> Option<PuyoPair> {
        self.queue.front().copied()
    }

    /// Remove the head piece; the game source calls this after a commit
    pub fn pop_pair(&mut self) -> Option<PuyoPair> {
        self.queue.pop_front()
    }

    /// Append a freshly drawn piece to the back of the queue
    pub fn push_pair(&mut self, pair: PuyoPair) {
        self.queue.push_back(pair);
    }

    /// Check if the spawn cell is covered (dropping in place would lose)
    pub fn is_spawn_blocked(&self) -> bool {
        self.board.is_filled(SPAWN_COLUMN as i8, TOP_ROW)
    }

    /// Every legal move for the queue-head piece.
    ///
    /// At most [`MAX_MOVES`] entries: vertical orientations over all 6
    /// columns, horizontal over the 5 left-column positions, minus anything
    /// the board blocks. Empty when the queue is empty. Read-only and
    /// re-invocable.
    pub fn get_moves(&self) -> ArrayVec<Move, MAX_MOVES> {
        let mut moves = ArrayVec::new();
        let head = match self.peek() {
            Some(pair) => pair,
            None => return moves,
        };
        for orientation in 0..ORIENTATION_COUNT {
            let columns = if orientation % 2 == 0 {
                BOARD_WIDTH
            } else {
                BOARD_WIDTH - 1
            };
            for x in 0..columns {
                if self.board.can_place(orientation, x) {
                    moves.push(Move::new(head, orientation, x));
                }
            }
        }
        moves
    }

    /// Apply one move: validate, drop the pair, and resolve all chains.
    ///
    /// The queue is left untouched. On the degenerate spawn-covered case the
    /// board is also untouched and the outcome reports `game_over`. Any
    /// error leaves prior board mutations in place; callers must discard or
    /// re-validate the state.
    pub fn apply_move(&mut self, mv: Move) -> Result<MoveOutcome, EngineError> {
        self.validate(&mv)?;

        // The in-place drop on a covered spawn cell loses the game instead
        // of being rejected.
        if mv.orientation == 0 && mv.x == SPAWN_COLUMN && self.is_spawn_blocked() {
            return Ok(MoveOutcome {
                game_over: true,
                ..MoveOutcome::default()
            });
        }

        if !self.board.can_place(mv.orientation, mv.x) {
            return Err(EngineError::IllegalPlacement { x: mv.x });
        }

        for (x, cell) in placements(mv.pair, mv.orientation, mv.x) {
            self.board.drop_cell(x, cell)?;
        }

        Ok(resolve_chains(&mut self.board))
    }

    fn validate(&self, mv: &Move) -> Result<(), EngineError> {
        let invalid = |reason: &'static str| EngineError::InvalidMove {
            orientation: mv.orientation,
            x: mv.x,
            reason,
        };

        if mv.orientation >= ORIENTATION_COUNT {
            return Err(invalid("orientation out of range"));
        }
        let columns = if mv.orientation % 2 == 0 {
            BOARD_WIDTH
        } else {
            BOARD_WIDTH - 1
        };
        if mv.x >= columns {
            return Err(invalid("column out of range for this orientation"));
        }
        match self.peek() {
            None => Err(invalid("queue is empty")),
            Some(head) if head != mv.pair => Err(invalid("pair does not match the queue head")),
            Some(_) => Ok(()),
        }
    }
}

impl Simulate for PuyoState {
    fn get_moves(&self) -> ArrayVec<Move, MAX_MOVES> {
        PuyoState::get_moves(self)
    }

    fn apply_move(&mut self, mv: Move) -> Result<MoveOutcome, EngineError> {
        PuyoState::apply_move(self, mv)
    }
}

/// Physical placement of a pair: (column, cell) entries in drop order.
///
/// Orientations 2 and 3 swap the pair so the cell that physically sits lower
/// (or is dropped first) comes first; for horizontal placements x names the
/// left column.
fn placements(pair: PuyoPair, orientation: u8, x: u8) -> [(u8, Cell); 2] {
    let axis = Cell::Color(pair.axis);
    let child = Cell::Color(pair.child);
    match orientation {
        0 => [(x, axis), (x, child)],
        1 => [(x, axis), (x + 1, child)],
        2 => [(x, child), (x, axis)],
        _ => [(x, child), (x + 1, axis)],
    }
}

/// Run elimination passes with gravity in between until the board is stable.
///
/// This is the settling half of [`PuyoState::apply_move`], exposed on its own
/// so callers can resolve hypothetical drops that bypass the move contract.
/// Chain power counts up from the first pass; `game_over` is always false.
pub fn resolve_chains(board: &mut Board) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();
    for pass in 0..MAX_CHAIN_PASSES {
        let stats = clear_groups(board);
        if !stats.cleared_any() {
            break;
        }
        board.settle();
        outcome.score += pass_score(
            pass,
            stats.cells_cleared,
            stats.distinct_colors,
            stats.group_bonus,
        );
        outcome.chains += 1;
        outcome.cells_cleared += stats.cells_cleared;
    }
    outcome
}

impl fmt::Display for PuyoState {
    /// Diagnostic rendering: rows top to bottom, space-separated cell codes,
    /// with the queued pairs previewed beside the top two rows (children
    /// across the first row, axis cells across the second).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..BOARD_HEIGHT as i8).rev() {
            for x in 0..BOARD_WIDTH as i8 {
                if x > 0 {
                    write!(f, " ")?;
                }
                let cell = self.board.get(x, y).unwrap_or(Cell::Empty);
                write!(f, "{}", cell.as_char())?;
            }
            let preview_row = (TOP_ROW - y) as usize;
            if preview_row < 2 && !self.queue.is_empty() {
                write!(f, "  ")?;
                for pair in &self.queue {
                    let color = if preview_row == 0 { pair.child } else { pair.axis };
                    write!(f, "{}", color.as_char())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
