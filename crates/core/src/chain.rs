//! Chain elimination - flood-fill group detection and obstacle clearing
//!
//! One elimination pass clears every maximal 4-connected same-color group of
//! four or more cells, plus any obstacle touching a cleared cell. The caller
//! settles the board between passes; chains are the passes that keep firing.

use arrayvec::ArrayVec;

use puyo_ai_types::{Cell, PuyoColor, BOARD_HEIGHT, BOARD_WIDTH};

use crate::board::{Board, BOARD_SIZE};
use crate::scoring::group_bonus;

/// Cells needed to form a clearable group
pub const MIN_GROUP_SIZE: usize = 4;

const NEIGHBORS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Accounting for one elimination pass
///
/// `cells_cleared` counts colored cells only; obstacles removed alongside a
/// group are a side effect and never scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub cells_cleared: u32,
    pub distinct_colors: u32,
    pub group_bonus: u32,
}

impl PassStats {
    pub fn cleared_any(&self) -> bool {
        self.cells_cleared > 0
    }
}

/// Visited-set slot for an in-bounds coordinate
#[inline(always)]
fn slot(x: i8, y: i8) -> usize {
    (x as usize) * (BOARD_HEIGHT as usize) + (y as usize)
}

/// Flood-fill the maximal same-color group containing (x, y) into `group`.
///
/// Iterative with an explicit work list; the work list and visited set are
/// bounded by the board size, so depth never depends on group shape. Marks
/// every reached cell in `visited`.
fn collect_group(
    board: &Board,
    x: i8,
    y: i8,
    color: PuyoColor,
    visited: &mut [bool; BOARD_SIZE],
    group: &mut ArrayVec<(i8, i8), BOARD_SIZE>,
) {
    group.clear();
    let mut work: ArrayVec<(i8, i8), BOARD_SIZE> = ArrayVec::new();
    visited[slot(x, y)] = true;
    work.push((x, y));

    while let Some((cx, cy)) = work.pop() {
        group.push((cx, cy));
        for (dx, dy) in NEIGHBORS {
            let (nx, ny) = (cx + dx, cy + dy);
            // `get` rejects out-of-bounds neighbors before `slot` runs.
            if board.get(nx, ny) == Some(Cell::Color(color)) && !visited[slot(nx, ny)] {
                visited[slot(nx, ny)] = true;
                work.push((nx, ny));
            }
        }
    }
}

/// One elimination pass over the whole board.
///
/// Clears every group of [`MIN_GROUP_SIZE`]+ same-color cells and every
/// obstacle 4-adjacent to a cleared cell. Returns the pass accounting; a
/// result with `cells_cleared == 0` means the board is stable and the chain
/// is over. Does not settle the board.
pub fn clear_groups(board: &mut Board) -> PassStats {
    let mut visited = [false; BOARD_SIZE];
    let mut group: ArrayVec<(i8, i8), BOARD_SIZE> = ArrayVec::new();
    let mut colors_seen = [false; PuyoColor::ALL.len()];
    let mut stats = PassStats::default();

    for x in 0..BOARD_WIDTH as i8 {
        for y in 0..BOARD_HEIGHT as i8 {
            if visited[slot(x, y)] {
                continue;
            }
            let color = match board.get(x, y).and_then(|c| c.color()) {
                Some(color) => color,
                None => continue,
            };
            collect_group(board, x, y, color, &mut visited, &mut group);
            if group.len() < MIN_GROUP_SIZE {
                continue;
            }

            for &(gx, gy) in &group {
                board.set(gx, gy, Cell::Empty);
            }
            for &(gx, gy) in &group {
                for (dx, dy) in NEIGHBORS {
                    let (nx, ny) = (gx + dx, gy + dy);
                    if board.get(nx, ny) == Some(Cell::Obstacle) {
                        board.set(nx, ny, Cell::Empty);
                    }
                }
            }

            stats.cells_cleared += group.len() as u32;
            stats.group_bonus += group_bonus(group.len());
            colors_seen[color.index()] = true;
        }
    }

    stats.distinct_colors = colors_seen.iter().filter(|&&seen| seen).count() as u32;
    stats
}

/// Size of every maximal same-color group on the board, singletons included.
///
/// Read-only companion to [`clear_groups`] for callers that rank boards by
/// how well connected the colors already are. Obstacles are not grouped.
pub fn group_sizes(board: &Board) -> ArrayVec<u8, BOARD_SIZE> {
    let mut visited = [false; BOARD_SIZE];
    let mut group: ArrayVec<(i8, i8), BOARD_SIZE> = ArrayVec::new();
    let mut sizes = ArrayVec::new();

    for x in 0..BOARD_WIDTH as i8 {
        for y in 0..BOARD_HEIGHT as i8 {
            if visited[slot(x, y)] {
                continue;
            }
            let color = match board.get(x, y).and_then(|c| c.color()) {
                Some(color) => color,
                None => continue,
            };
            collect_group(board, x, y, color, &mut visited, &mut group);
            sizes.push(group.len() as u8);
        }
    }
    sizes
}
