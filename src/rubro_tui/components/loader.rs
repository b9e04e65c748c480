//! Loading indicator shown while the first list fetch is pending

use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::rubro_tui::ui::Styles;

const FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

#[derive(Debug, Default)]
pub struct Loader {
    frame: usize,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the spinner by one frame
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    pub fn label(&self) -> String {
        format!("{} Cargando...", FRAMES[self.frame])
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.label())
            .style(Styles::info())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(paragraph, area);
    }
}
