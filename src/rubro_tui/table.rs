//! Rubro table: the record list, its loading state and row selection

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::models::Rubro;
use crate::rubro_tui::{components::Loader, traits::Navigable, ui::Styles};

/// Configuration for rubro table display
#[derive(Debug, Clone)]
pub struct RubroTableConfig {
    pub title: String,
    pub name_width: u16,
    pub parent_width: u16,
    pub status_width: u16,
}

impl Default for RubroTableConfig {
    fn default() -> Self {
        Self {
            title: "Rubros".to_string(),
            name_width: 30,
            parent_width: 24,
            status_width: 16,
        }
    }
}

pub struct RubroTable {
    /// Records in server order
    pub records: Vec<Rubro>,
    pub state: TableState,
    pub config: RubroTableConfig,
    /// True until the first fetch resolves
    pub is_loading: bool,
    /// Error from the most recent failed fetch, cleared on success
    pub load_error: Option<String>,
}

impl RubroTable {
    pub fn new(config: RubroTableConfig) -> Self {
        Self {
            records: Vec::new(),
            state: TableState::default(),
            config,
            is_loading: true,
            load_error: None,
        }
    }

    /// Replace the records wholesale, keeping the selection in range
    pub fn set_records(&mut self, records: Vec<Rubro>) {
        self.records = records;
        self.is_loading = false;
        self.load_error = None;

        let selected = match self.state.selected() {
            _ if self.records.is_empty() => None,
            Some(idx) if idx < self.records.len() => Some(idx),
            Some(_) => Some(self.records.len() - 1),
            None => Some(0),
        };
        self.state.select(selected);
    }

    /// Record a failed fetch; existing records are retained
    pub fn set_load_error(&mut self, message: String) {
        self.is_loading = false;
        self.load_error = Some(message);
    }

    pub fn selected(&self) -> Option<&Rubro> {
        self.state.selected().and_then(|i| self.records.get(i))
    }

    fn title(&self) -> String {
        match &self.load_error {
            Some(err) => format!(
                "{} ({}) - Error: {}",
                self.config.title,
                self.records.len(),
                err
            ),
            None => format!("{} ({})", self.config.title, self.records.len()),
        }
    }

    /// Render the table, or the loader while the first fetch is pending
    pub fn render(&mut self, f: &mut Frame, area: Rect, loader: &Loader) {
        if self.is_loading {
            loader.render(f, area);
            return;
        }

        if self.records.is_empty() {
            let (text, style) = match &self.load_error {
                Some(err) => (format!("No se pudieron cargar los rubros: {}", err), Styles::error()),
                None => (
                    "No hay rubros cargados. Presione 'n' para crear uno.".to_string(),
                    Styles::inactive(),
                ),
            };
            let paragraph = Paragraph::new(text)
                .style(style)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title(self.title())
                        .borders(Borders::ALL)
                        .border_style(Styles::active_border()),
                );
            f.render_widget(paragraph, area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Nombre del Rubro"),
            Cell::from("Rubro Padre"),
            Cell::from("Estado de Rubro"),
            Cell::from("Acciones"),
        ])
        .style(Styles::title());

        let selected = self.state.selected();
        let rows: Vec<Row> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, rubro)| {
                let actions = if Some(i) == selected {
                    Line::from(vec![
                        Span::raw("[e] Editar  "),
                        Span::raw("[d] Borrar"),
                    ])
                } else {
                    Line::from(Span::styled("Editar  Borrar", Styles::inactive()))
                };
                Row::new(vec![
                    Cell::from(rubro.denominacion.clone()),
                    Cell::from(rubro.rubro_padre.clone()),
                    Cell::from(rubro.estado_rubro.clone()),
                    Cell::from(actions),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(self.config.name_width),
            Constraint::Length(self.config.parent_width),
            Constraint::Length(self.config.status_width),
            Constraint::Min(20),
        ];

        let border_style = if self.load_error.is_some() {
            Styles::error()
        } else {
            Styles::active_border()
        };

        let table = Table::new(rows, widths)
            .header(header)
            .highlight_style(Styles::selected())
            .block(
                Block::default()
                    .title(self.title())
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );

        f.render_stateful_widget(table, area, &mut self.state);
    }
}

impl Navigable for RubroTable {
    fn navigate_up(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.records.len() - 1
        } else {
            selected - 1
        };
        self.state.select(Some(new_selected));
    }

    fn navigate_down(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let new_selected = match self.state.selected() {
            Some(i) => (i + 1) % self.records.len(),
            None => 0,
        };
        self.state.select(Some(new_selected));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rubro(id: u64, name: &str) -> Rubro {
        Rubro {
            id,
            denominacion: name.to_string(),
            ..Rubro::blank()
        }
    }

    #[test]
    fn test_set_records_keeps_server_order() {
        let mut table = RubroTable::new(RubroTableConfig::default());
        assert!(table.is_loading);

        table.set_records(vec![rubro(9, "Zapatos"), rubro(1, "Almacén"), rubro(5, "Bebidas")]);
        assert!(!table.is_loading);
        let ids: Vec<u64> = table.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![9, 1, 5]);
        assert_eq!(table.selected().map(|r| r.id), Some(9));
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let mut table = RubroTable::new(RubroTableConfig::default());
        table.set_records(vec![rubro(1, "a"), rubro(2, "b"), rubro(3, "c")]);
        table.navigate_to_last();
        assert_eq!(table.selected().map(|r| r.id), Some(3));

        table.set_records(vec![rubro(1, "a"), rubro(2, "b")]);
        assert_eq!(table.selected().map(|r| r.id), Some(2));

        table.set_records(Vec::new());
        assert_eq!(table.selected(), None);
    }

    #[test]
    fn test_load_error_retains_stale_records() {
        let mut table = RubroTable::new(RubroTableConfig::default());
        table.set_records(vec![rubro(1, "Bebidas")]);

        table.set_load_error("connection refused".to_string());
        assert_eq!(table.records.len(), 1);
        assert!(!table.is_loading);
        assert_eq!(table.title(), "Rubros (1) - Error: connection refused");

        table.set_records(vec![rubro(1, "Bebidas"), rubro(2, "Lácteos")]);
        assert_eq!(table.load_error, None);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut table = RubroTable::new(RubroTableConfig::default());
        table.set_records(vec![rubro(1, "a"), rubro(2, "b")]);

        table.navigate_up();
        assert_eq!(table.get_selected_index(), Some(1));
        table.navigate_down();
        assert_eq!(table.get_selected_index(), Some(0));
    }
}
