//! Main TUI application state and loop

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

use super::components::Notifications;
use super::events::AppEvent;
use super::screen::RubroScreen;
use super::traits::ScreenAction;
use super::ui::centered_rect;
use crate::config::Config;
use crate::service::RubroService;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Main TUI application state
pub struct App {
    pub screen: RubroScreen,
    events: UnboundedReceiver<AppEvent>,
    pub should_quit: bool,
    pub show_help_popup: bool,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: &Config, service: Arc<dyn RubroService>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            screen: RubroScreen::new(
                service,
                tx,
                Notifications::new(config.notification_timeout()),
            ),
            events: rx,
            should_quit: false,
            show_help_popup: false,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.screen.refresh();

        loop {
            self.drain_events();
            self.screen.tick(chrono::Local::now());

            terminal.draw(|f| self.draw(f))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            if self.should_quit {
                info!("Quit requested");
                break;
            }
        }

        Ok(())
    }

    /// Apply every background result that has arrived since the last frame
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.screen.handle_event(event);
        }
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.show_help_popup {
            // any key dismisses the popup
            self.show_help_popup = false;
            return;
        }

        match self.screen.handle_key(key) {
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::ToggleHelp => self.show_help_popup = !self.show_help_popup,
            ScreenAction::None => {}
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.screen.draw(f, chunks[0]);
        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw status bar with shortcuts for the current context
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if self.screen.modal.is_some() {
            "Rubros | Tab: Siguiente campo | Enter: Guardar/Confirmar | Esc: Cancelar".to_string()
        } else {
            format!(
                "Rubros - {} registros | n: Nuevo | e: Editar | d: Borrar | r: Recargar | ?: Ayuda | q: Salir",
                self.screen.table.records.len()
            )
        };

        let style = if self.screen.table.load_error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 60, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(help_text())
            .block(
                Block::default()
                    .title("Ayuda - Atajos")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }
}

fn help_text() -> &'static str {
    "Tabla de rubros:\n\
    ↑/↓ (k/j) - Mover selección\n\
    n - Nuevo rubro\n\
    e / Enter - Editar rubro seleccionado\n\
    d / Supr - Borrar rubro seleccionado\n\
    r - Recargar lista\n\
    q - Salir\n\n\
    Formulario:\n\
    Tab / Shift+Tab - Cambiar de campo\n\
    Enter - Guardar\n\
    Esc - Cancelar\n\n\
    Confirmación de borrado:\n\
    Enter / y - Borrar\n\
    Esc / n - Cancelar"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::RecordingService;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app() -> App {
        App::new(&Config::default(), Arc::new(RecordingService::default()))
    }

    #[tokio::test]
    async fn test_help_popup_toggles_and_dismisses() {
        let mut app = app();
        app.handle_key_event(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE));
        assert!(app.show_help_popup);

        // keys do not reach the screen while help is shown
        app.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!app.show_help_popup);
        assert!(!app.should_quit);

        app.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_drain_events_applies_fetch_results() {
        let mut app = app();
        app.screen.refresh();
        tokio::task::yield_now().await;

        while app.screen.table.is_loading {
            tokio::task::yield_now().await;
            app.drain_events();
        }
        assert!(app.screen.table.records.is_empty());
        assert!(app.screen.table.load_error.is_none());
    }
}
