//! Terminal rendering for the simulation.
//!
//! Split into a pure view layer and an I/O layer: [`view`] lays out styled
//! lines from a game state, [`screen`] flushes them with crossterm. Layout
//! and color stay unit-testable; only [`Screen`] touches the terminal.

pub mod screen;
pub mod view;

pub use screen::Screen;
pub use view::{cell_color, to_text, BoardView, Hud, Line, Rgb, Span};
