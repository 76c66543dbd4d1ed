//! Default look of the widgets.

use std::time::Duration;

use ratatui::style::{Color, Modifier, Style};

pub const BUTTON_BACKGROUND: Color = Color::Blue;
pub const BUTTON_FOREGROUND: Color = Color::White;
/// Corner radius in logical points.
pub const BUTTON_CORNER_RADIUS: u16 = 10;

pub const CAPTION: Color = Color::Gray;
pub const ERROR: Color = Color::Red;
pub const PLACEHOLDER: Color = Color::DarkGray;
pub const FOCUS: Color = Color::Cyan;

/// Spinner size in logical points.
pub const SPINNER_SIZE: u16 = 50;
pub const SPINNER_COLOR: Color = Color::White;
/// The default overlay spinner is drawn this much larger than its frame.
pub const SPINNER_SCALE: f32 = 1.5;

pub const FADE_DURATION: Duration = Duration::from_millis(350);

/// Half-transparent black: cells keep their symbols but are dimmed and
/// darkened.
pub fn overlay_barrier() -> Style {
    Style::new().bg(Color::Black).add_modifier(Modifier::DIM)
}

/// Converts a size in logical points to terminal cells.
///
/// A cell is roughly 10 points wide and 25 points tall.
pub fn points_to_cells(size: u16) -> (u16, u16) {
    ((size / 10).max(1), (size / 25).max(1))
}
