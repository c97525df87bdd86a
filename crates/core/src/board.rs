//! Board module - manages the puzzle grid
//!
//! The board is a 6x12 grid where each cell is empty, a colored puyo, or an
//! obstacle. Uses a flat array for cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..5 (left to right), y ranges 0..11
//! (bottom to top). Pieces spawn at the top of column 2.

use std::fmt;

use puyo_ai_types::{
    Cell, EngineError, BOARD_HEIGHT, BOARD_WIDTH, ORIENTATION_COUNT, SPAWN_COLUMN,
};

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

const TOP_ROW: i8 = BOARD_HEIGHT as i8 - 1;

/// The game board - 6 columns x 12 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, column-major order (x * HEIGHT + y)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((x as usize) * (BOARD_HEIGHT as usize) + (y as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Check if position is within bounds and holds a puyo or obstacle
    pub fn is_filled(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c.is_filled())
    }

    /// Lowest empty row of a column, where a dropped cell would land
    /// Returns None when the column is full (or x is out of range)
    pub fn lowest_empty(&self, x: u8) -> Option<u8> {
        (0..BOARD_HEIGHT).find(|&y| self.is_empty(x as i8, y as i8))
    }

    /// Number of filled cells in a column
    pub fn column_fill(&self, x: u8) -> u8 {
        (0..BOARD_HEIGHT)
            .filter(|&y| self.is_filled(x as i8, y as i8))
            .count() as u8
    }

    /// Number of filled cells on the whole board
    pub fn filled_cells(&self) -> u32 {
        self.cells.iter().filter(|c| c.is_filled()).count() as u32
    }

    /// Drop a single cell into a column: it lands on the lowest empty row.
    /// Returns the landing row. The column index must be in range.
    pub fn drop_cell(&mut self, x: u8, cell: Cell) -> Result<u8, EngineError> {
        let y = self
            .lowest_empty(x)
            .ok_or(EngineError::ColumnFull { x })?;
        self.set(x as i8, y as i8, cell);
        Ok(y)
    }

    /// Spawn-path legality for placing a pair with the given orientation at
    /// column x. Read-only; returns false for out-of-range arguments.
    ///
    /// A piece enters at the top of the spawn column, rotates in place, then
    /// translates sideways to its target. Every column its cells sweep over
    /// must be open at the top row. The no-translation vertical placement at
    /// the spawn column is always allowed; dropping there with the top cell
    /// already filled is the game-over condition, resolved by the caller.
    pub fn can_place(&self, orientation: u8, x: u8) -> bool {
        if orientation >= ORIENTATION_COUNT {
            return false;
        }
        let span: u8 = if orientation % 2 == 0 { 1 } else { 2 };
        if x >= BOARD_WIDTH || x + span > BOARD_WIDTH {
            return false;
        }

        if orientation == 0 && x == SPAWN_COLUMN {
            return true;
        }

        // No room to rotate when both spawn neighbors are capped.
        if orientation != 0
            && self.is_filled(SPAWN_COLUMN as i8 - 1, TOP_ROW)
            && self.is_filled(SPAWN_COLUMN as i8 + 1, TOP_ROW)
        {
            return false;
        }

        let rightmost = x + span - 1;
        let lo = x.min(SPAWN_COLUMN);
        let hi = rightmost.max(SPAWN_COLUMN);
        for col in lo..=hi {
            if self.is_filled(col as i8, TOP_ROW) {
                return false;
            }
        }
        true
    }

    /// Compact every column after an elimination pass: filled cells shift
    /// down to close gaps, relative order preserved, empties on top.
    /// Column-local; cells never move sideways.
    pub fn settle(&mut self) {
        let height = BOARD_HEIGHT as usize;
        for x in 0..BOARD_WIDTH as usize {
            let column = &mut self.cells[x * height..(x + 1) * height];
            let mut write = 0;
            for read in 0..height {
                if column[read].is_filled() {
                    if write != read {
                        column[write] = column[read];
                    }
                    write += 1;
                }
            }
            for cell in &mut column[write..] {
                *cell = Cell::Empty;
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Parse a board from row strings for testing.
    ///
    /// Rows are written top to bottom as they look on screen; missing rows
    /// above are empty. Each row is 6 cell codes.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= BOARD_HEIGHT as usize);
        let mut board = Self::new();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), BOARD_WIDTH as usize, "bad row: {row:?}");
            let y = (rows.len() - 1 - i) as i8;
            for (x, code) in row.chars().enumerate() {
                let cell = Cell::from_char(code).unwrap_or_else(|| panic!("bad code: {code:?}"));
                board.set(x as i8, y, cell);
            }
        }
        board
    }

    /// Render to row strings (top to bottom) for test assertions
    #[cfg(test)]
    pub fn to_rows(&self) -> Vec<String> {
        (0..BOARD_HEIGHT as i8)
            .rev()
            .map(|y| {
                (0..BOARD_WIDTH as i8)
                    .map(|x| self.get(x, y).unwrap_or(Cell::Empty).as_char())
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Cell codes laid out as on screen: rows top to bottom, no separators
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..BOARD_HEIGHT as i8).rev() {
            for x in 0..BOARD_WIDTH as i8 {
                let cell = self.get(x, y).unwrap_or(Cell::Empty);
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
