//! Common UI styles and layout helpers for the Rubro TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
};
use unicode_width::UnicodeWidthChar;

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default()
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn modal_header() -> Style {
        Style::default()
            .bg(Color::Rgb(0xA5, 0x23, 0x26))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn danger_button() -> Style {
        Style::default()
            .bg(Color::Red)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn primary_button() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn disabled_button() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::Gray)
    }
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Center a fixed-height rectangle horizontally by percentage
pub fn centered_fixed_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let y = r.y + (r.height - height) / 2;
    let width = (r.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let x = r.x + (r.width - width) / 2;
    Rect::new(x, y, width, height)
}

/// Display width of the first `chars` characters of `s`
pub fn display_width(s: &str, chars: usize) -> usize {
    s.chars()
        .take(chars)
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_fixed_rect(60, 10, area);
        assert_eq!(rect, Rect::new(20, 15, 60, 10));

        let clamped = centered_fixed_rect(60, 80, area);
        assert_eq!(clamped.height, 40);
    }

    #[test]
    fn test_display_width_counts_accented_chars_once() {
        assert_eq!(display_width("Almacén", 7), 7);
        assert_eq!(display_width("Almacén", 3), 3);
    }
}
