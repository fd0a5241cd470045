//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Status;

/// Header and status bar background.
pub const BAR: Color = Color::Rgb(0, 80, 0);
/// Open work.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Blocked on someone else.
pub const STEEL: Color = Color::Rgb(110, 160, 200);

/// Foreground color for a row with this status.
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => GOLD,
        Status::Wait => STEEL,
        Status::Done => Color::DarkGray,
        Status::Unset => Color::White,
    }
}
