//! Shared types module - data structures and constants for the Puyo simulator
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures, usable in any context (engine, policy
//! ranking, terminal rendering, transcript records).
//!
//! # Board Dimensions
//!
//! Standard Puyo Puyo playfield dimensions:
//!
//! - **Width**: 6 columns (indexed 0-5)
//! - **Height**: 12 rows (indexed 0-11, row 0 at the bottom)
//! - **Spawn column**: 2 (pieces enter at the top of this column)
//!
//! # Cell Codes
//!
//! Single-character codes used by board parsing, rendering, and transcripts:
//!
//! | Code | Cell |
//! |------|------|
//! | `.`  | empty |
//! | `r`  | red |
//! | `g`  | green |
//! | `b`  | blue |
//! | `y`  | yellow |
//! | `p`  | purple |
//! | `k`  | obstacle ("black") |
//!
//! # Orientations
//!
//! A piece is a pair of colored cells (axis + child) and occupies one of four
//! rotation states, numbered to match the controller protocol:
//!
//! | Orientation | Placement | Axis position |
//! |-------------|-----------|---------------|
//! | 0 | vertical at column x | below child |
//! | 1 | horizontal at columns x, x+1 | left of child |
//! | 2 | vertical at column x | above child |
//! | 3 | horizontal at columns x, x+1 | right of child |
//!
//! For horizontal placements `x` always names the left column.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board width in cells (6 columns)
pub const BOARD_WIDTH: u8 = 6;

/// Board height in cells (12 rows)
pub const BOARD_HEIGHT: u8 = 12;

/// Column where new pieces spawn
pub const SPAWN_COLUMN: u8 = 2;

/// Number of rotation states a piece can occupy
pub const ORIENTATION_COUNT: u8 = 4;

/// Pieces visible in the upcoming-piece queue
pub const QUEUE_LEN: usize = 3;

/// The five playable cell colors
///
/// Obstacle cells are not colors; they never form a falling piece and never
/// join an elimination group on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PuyoColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl PuyoColor {
    /// All playable colors, in code order
    pub const ALL: [PuyoColor; 5] = [
        PuyoColor::Red,
        PuyoColor::Green,
        PuyoColor::Blue,
        PuyoColor::Yellow,
        PuyoColor::Purple,
    ];

    /// Parse a color from its single-character code
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_ai_types::PuyoColor;
    ///
    /// assert_eq!(PuyoColor::from_char('r'), Some(PuyoColor::Red));
    /// assert_eq!(PuyoColor::from_char('p'), Some(PuyoColor::Purple));
    /// assert_eq!(PuyoColor::from_char('k'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'r' => Some(PuyoColor::Red),
            'g' => Some(PuyoColor::Green),
            'b' => Some(PuyoColor::Blue),
            'y' => Some(PuyoColor::Yellow),
            'p' => Some(PuyoColor::Purple),
            _ => None,
        }
    }

    /// Single-character code for this color
    pub fn as_char(&self) -> char {
        match self {
            PuyoColor::Red => 'r',
            PuyoColor::Green => 'g',
            PuyoColor::Blue => 'b',
            PuyoColor::Yellow => 'y',
            PuyoColor::Purple => 'p',
        }
    }

    /// Stable index 0-4, usable as a table or bitset slot
    pub fn index(&self) -> usize {
        match self {
            PuyoColor::Red => 0,
            PuyoColor::Green => 1,
            PuyoColor::Blue => 2,
            PuyoColor::Yellow => 3,
            PuyoColor::Purple => 4,
        }
    }
}

/// A cell on the game board
///
/// The board is a closed world: every cell is empty, one of the five playable
/// colors, or an obstacle. Obstacles are cleared only as a side effect of an
/// adjacent group elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Color(PuyoColor),
    Obstacle,
}

impl Cell {
    /// Parse a cell from its single-character code
    ///
    /// Accepts `' '` as an alias for `'.'` so boards captured from older
    /// space-padded dumps still parse.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'k' => Some(Cell::Obstacle),
            _ => PuyoColor::from_char(c).map(Cell::Color),
        }
    }

    /// Single-character code for this cell
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_ai_types::{Cell, PuyoColor};
    ///
    /// assert_eq!(Cell::Empty.as_char(), '.');
    /// assert_eq!(Cell::Color(PuyoColor::Green).as_char(), 'g');
    /// assert_eq!(Cell::Obstacle.as_char(), 'k');
    /// ```
    pub fn as_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Color(c) => c.as_char(),
            Cell::Obstacle => 'k',
        }
    }

    /// True for any non-empty cell
    pub fn is_filled(&self) -> bool {
        !matches!(self, Cell::Empty)
    }

    /// The playable color, if this cell has one
    pub fn color(&self) -> Option<PuyoColor> {
        match self {
            Cell::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

/// A falling piece: an ordered pair of colored cells
///
/// The axis cell is the rotation center and the bottom cell of the vertical
/// spawn orientation; the child rotates around it. Pair codes read top to
/// bottom at spawn, so `"rg"` is a red child above a green axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuyoPair {
    pub axis: PuyoColor,
    pub child: PuyoColor,
}

impl PuyoPair {
    pub fn new(axis: PuyoColor, child: PuyoColor) -> Self {
        PuyoPair { axis, child }
    }

    /// Parse a two-character pair code (child first, then axis)
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_ai_types::{PuyoColor, PuyoPair};
    ///
    /// let pair = PuyoPair::from_code("rg").unwrap();
    /// assert_eq!(pair.child, PuyoColor::Red);
    /// assert_eq!(pair.axis, PuyoColor::Green);
    /// assert_eq!(pair.code(), "rg");
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let child = PuyoColor::from_char(chars.next()?)?;
        let axis = PuyoColor::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(PuyoPair { axis, child })
    }

    /// Two-character pair code (child first, then axis)
    pub fn code(&self) -> String {
        let mut s = String::with_capacity(2);
        s.push(self.child.as_char());
        s.push(self.axis.as_char());
        s
    }
}

/// A candidate or committed placement of the queue-head piece
///
/// `orientation` follows the table in the module docs. `fast_down` asks an
/// external executor to hold the drop button; the simulation ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub pair: PuyoPair,
    pub orientation: u8,
    pub x: u8,
    pub fast_down: bool,
}

impl Move {
    pub fn new(pair: PuyoPair, orientation: u8, x: u8) -> Self {
        Move {
            pair,
            orientation,
            x,
            fast_down: false,
        }
    }
}

/// Outcome of one committed move, produced fresh by every `apply_move`
///
/// `chains` counts elimination passes that cleared at least one group;
/// `cells_cleared` counts colored cells only (obstacles are a side effect and
/// are not counted).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub score: u32,
    pub chains: u32,
    pub cells_cleared: u32,
    pub game_over: bool,
}

/// Errors surfaced by the simulation engine.
///
/// All variants are synchronous precondition failures. A state that returned
/// an error must be re-validated or discarded; the engine never repairs a
/// partially mutated board.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Caller broke the move contract: orientation or column out of range,
    /// pair not matching the queue head, or no piece pending.
    #[error("invalid move (orientation {orientation}, column {x}): {reason}")]
    InvalidMove {
        orientation: u8,
        x: u8,
        reason: &'static str,
    },

    /// Structurally valid move blocked by the current board state.
    #[error("placement at column {x} is blocked at the top row")]
    IllegalPlacement { x: u8 },

    /// A drop overflowed a column that had no empty cell left.
    #[error("column {x} cannot take another cell")]
    ColumnFull { x: u8 },
}
