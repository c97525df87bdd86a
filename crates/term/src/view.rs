//! BoardView: maps a game state into styled terminal lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use puyo_ai_core::PuyoState;
use puyo_ai_types::{Cell, PuyoColor, BOARD_HEIGHT, BOARD_WIDTH};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A run of characters drawn in one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub fg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Span {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: Rgb::new(220, 220, 220),
            bold: false,
            dim: false,
        }
    }

    fn label(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }
}

/// One terminal row of spans
pub type Line = Vec<Span>;

/// Run info drawn in the panel beside the board
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud {
    pub turn: u32,
    pub score: u64,
    pub best_chain: u32,
}

/// Display color for each cell kind
pub fn cell_color(cell: Cell) -> Rgb {
    match cell {
        Cell::Empty => Rgb::new(90, 90, 100),
        Cell::Color(PuyoColor::Red) => Rgb::new(255, 0, 0),
        Cell::Color(PuyoColor::Green) => Rgb::new(0, 255, 0),
        Cell::Color(PuyoColor::Blue) => Rgb::new(0, 200, 200),
        Cell::Color(PuyoColor::Yellow) => Rgb::new(255, 255, 0),
        Cell::Color(PuyoColor::Purple) => Rgb::new(128, 0, 128),
        Cell::Obstacle => Rgb::new(140, 140, 140),
    }
}

/// Renders a state plus run info into styled lines: bordered board on the
/// left, queue preview and counters on the right.
#[derive(Debug, Clone, Copy)]
pub struct BoardView {
    /// Terminal columns per board cell
    cell_w: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 cells compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: usize) -> Self {
        Self { cell_w }
    }

    pub fn render(&self, state: &PuyoState, hud: &Hud) -> Vec<Line> {
        let board_w = BOARD_WIDTH as usize * self.cell_w;
        let mut lines = Vec::with_capacity(BOARD_HEIGHT as usize + 2);

        lines.push(vec![Span::plain(format!("┌{}┐", "─".repeat(board_w)))]);
        for y in (0..BOARD_HEIGHT as i8).rev() {
            let mut line: Line = vec![Span::plain("│")];
            for x in 0..BOARD_WIDTH as i8 {
                let cell = state.board().get(x, y).unwrap_or(Cell::Empty);
                line.push(self.cell_span(cell));
            }
            line.push(Span::plain("│"));
            let panel_row = (BOARD_HEIGHT as i8 - 1 - y) as usize;
            self.push_panel(&mut line, state, hud, panel_row);
            lines.push(line);
        }
        lines.push(vec![Span::plain(format!("└{}┘", "─".repeat(board_w)))]);
        lines
    }

    fn cell_span(&self, cell: Cell) -> Span {
        let (glyph, dim) = match cell {
            Cell::Empty => ('·', true),
            _ => ('█', false),
        };
        let mut text = String::new();
        for _ in 0..self.cell_w {
            text.push(glyph);
        }
        Span {
            text,
            fg: cell_color(cell),
            bold: false,
            dim,
        }
    }

    fn push_panel(&self, line: &mut Line, state: &PuyoState, hud: &Hud, row: usize) {
        match row {
            0 => line.push(Span::label("  NEXT")),
            1..=3 => {
                if let Some(pair) = state.queue().get(row - 1) {
                    line.push(Span::plain("  "));
                    for color in [pair.child, pair.axis] {
                        line.push(Span {
                            text: color.as_char().to_string(),
                            fg: cell_color(Cell::Color(color)),
                            bold: false,
                            dim: false,
                        });
                    }
                }
            }
            5 => line.push(Span::label(format!("  TURN {}", hud.turn))),
            6 => line.push(Span::label(format!("  SCORE {}", hud.score))),
            7 => line.push(Span::label(format!("  CHAIN {}", hud.best_chain))),
            _ => {}
        }
    }
}

/// Flatten styled lines to plain text, one row per line
pub fn to_text(lines: &[Line]) -> String {
    let mut text = String::new();
    for line in lines {
        for span in line {
            text.push_str(&span.text);
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use puyo_ai_core::Board;
    use puyo_ai_types::PuyoPair;

    fn sample_state() -> PuyoState {
        let mut board = Board::new();
        board.set(0, 0, Cell::Color(PuyoColor::Red));
        board.set(1, 0, Cell::Obstacle);
        PuyoState::new(
            board,
            [
                PuyoPair::from_code("rg").unwrap(),
                PuyoPair::from_code("by").unwrap(),
                PuyoPair::from_code("pp").unwrap(),
            ],
        )
    }

    #[test]
    fn test_frame_is_board_rows_plus_border() {
        let lines = BoardView::default().render(&sample_state(), &Hud::default());
        assert_eq!(lines.len(), BOARD_HEIGHT as usize + 2);

        let top = &lines[0][0].text;
        assert!(top.starts_with('┌') && top.ends_with('┐'));
        assert_eq!(top.chars().count(), BOARD_WIDTH as usize * 2 + 2);
    }

    #[test]
    fn test_cells_draw_as_colored_blocks() {
        let lines = BoardView::default().render(&sample_state(), &Hud::default());
        // Bottom board row sits just above the lower border.
        let bottom = &lines[BOARD_HEIGHT as usize];
        let red = &bottom[1];
        assert_eq!(red.text, "██");
        assert_eq!(red.fg, Rgb::new(255, 0, 0));
        assert!(!red.dim);

        let obstacle = &bottom[2];
        assert_eq!(obstacle.text, "██");
        assert_eq!(obstacle.fg, Rgb::new(140, 140, 140));

        let empty = &bottom[3];
        assert_eq!(empty.text, "··");
        assert!(empty.dim);
    }

    #[test]
    fn test_panel_lists_queue_and_counters() {
        let hud = Hud {
            turn: 12,
            score: 560,
            best_chain: 2,
        };
        let text = to_text(&BoardView::default().render(&sample_state(), &hud));
        assert!(text.contains("NEXT"));
        assert!(text.contains("rg"));
        assert!(text.contains("by"));
        assert!(text.contains("pp"));
        assert!(text.contains("TURN 12"));
        assert!(text.contains("SCORE 560"));
        assert!(text.contains("CHAIN 2"));
    }

    #[test]
    fn test_every_color_has_a_distinct_display_color() {
        let mut seen = Vec::new();
        for color in PuyoColor::ALL {
            let rgb = cell_color(Cell::Color(color));
            assert!(!seen.contains(&rgb));
            seen.push(rgb);
        }
    }
}
