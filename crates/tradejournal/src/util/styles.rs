//! Common styling utilities for TUI components

use ratatui::style::Color;

/// Standard color for focused panels
pub const FOCUS_COLOR: Color = Color::Yellow;

/// Standard color for help text
pub const HELP_COLOR: Color = Color::DarkGray;

/// Standard color for headers
pub const HEADER_COLOR: Color = Color::Cyan;

/// Standard color for positive values
pub const POSITIVE_COLOR: Color = Color::Green;

/// Standard color for negative values
pub const NEGATIVE_COLOR: Color = Color::Red;

/// Standard color for flat days and caution values
pub const WARNING_COLOR: Color = Color::Yellow;

/// Payout rows and the payout series
pub const PAYOUT_COLOR: Color = Color::Magenta;

/// Green for gains (including flat), red for losses
pub fn value_color(value: f64) -> Color {
    if value >= 0.0 {
        POSITIVE_COLOR
    } else {
        NEGATIVE_COLOR
    }
}

/// Like [`value_color`] but flat days get their own color
pub fn pnl_color(pnl: f64) -> Color {
    if pnl > 0.0 {
        POSITIVE_COLOR
    } else if pnl < 0.0 {
        NEGATIVE_COLOR
    } else {
        WARNING_COLOR
    }
}

/// Red through yellow to green as `ratio` goes from 0.0 to 1.0
pub fn gradient_color(ratio: f64) -> Color {
    match ratio {
        r if r < 0.25 => Color::Red,
        r if r < 0.5 => Color::Yellow,
        r if r < 0.75 => Color::LightYellow,
        _ => POSITIVE_COLOR,
    }
}

/// Color for a 0-100 win rate
pub fn win_rate_color(win_rate: f64) -> Color {
    if win_rate >= 55.0 {
        POSITIVE_COLOR
    } else if win_rate >= 45.0 {
        WARNING_COLOR
    } else {
        NEGATIVE_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_color() {
        assert_eq!(value_color(100.0), POSITIVE_COLOR);
        assert_eq!(value_color(-100.0), NEGATIVE_COLOR);
        assert_eq!(value_color(0.0), POSITIVE_COLOR);
    }

    #[test]
    fn test_pnl_color_marks_flat_days() {
        assert_eq!(pnl_color(1.0), POSITIVE_COLOR);
        assert_eq!(pnl_color(-1.0), NEGATIVE_COLOR);
        assert_eq!(pnl_color(0.0), WARNING_COLOR);
    }

    #[test]
    fn test_gradient_color() {
        assert_eq!(gradient_color(-0.1), Color::Red);
        assert_eq!(gradient_color(0.4), Color::Yellow);
        assert_eq!(gradient_color(0.6), Color::LightYellow);
        assert_eq!(gradient_color(1.0), POSITIVE_COLOR);
    }

    #[test]
    fn test_win_rate_color() {
        assert_eq!(win_rate_color(60.0), POSITIVE_COLOR);
        assert_eq!(win_rate_color(50.0), WARNING_COLOR);
        assert_eq!(win_rate_color(20.0), NEGATIVE_COLOR);
    }
}
