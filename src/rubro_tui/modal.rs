//! Modal session: the delete confirmation dialog or the create/update form

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use crate::models::{ModalType, Rubro, RubroField};
use crate::rubro_tui::{
    components::{Form, FormField, FormFieldType},
    traits::FormHandler,
    ui::{centered_fixed_rect, Styles},
};
use crate::service::Mutation;

const FORM_HEIGHT: u16 = 22;
const DIALOG_HEIGHT: u16 = 9;

/// What the screen should do after the modal handled a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    None,
    Close,
    Submit,
}

#[derive(Debug, Clone)]
pub struct RubroModal {
    /// Serial number distinguishing this session from earlier ones
    pub session: u64,
    pub mode: ModalType,
    pub title: String,
    pub target: Rubro,
    pub form: Form,
    /// A remote call for this session is in flight
    pub busy: bool,
}

fn build_form(target: &Rubro) -> Form {
    let fields = RubroField::ALL
        .iter()
        .map(|field| {
            let field_type = if field.is_numeric() {
                FormFieldType::Date
            } else {
                FormFieldType::Text
            };
            FormField::new(field.label(), field_type)
                .required()
                .with_value(field.get(target))
        })
        .collect();
    Form::new(fields)
}

impl RubroModal {
    pub fn new(session: u64, title: &str, mode: ModalType, target: Rubro) -> Self {
        Self {
            session,
            mode,
            title: title.to_string(),
            form: build_form(&target),
            target,
            busy: false,
        }
    }

    /// Whether the primary action (save or confirm) is enabled
    pub fn can_submit(&self) -> bool {
        if self.busy {
            return false;
        }
        match self.mode {
            ModalType::Delete => true,
            ModalType::Create | ModalType::Update => self.form.is_valid(),
        }
    }

    /// The target record with the current form values applied
    pub fn values(&self) -> Rubro {
        let mut rubro = self.target.clone();
        for (field, input) in RubroField::ALL.iter().zip(&self.form.fields) {
            field.set(&mut rubro, input.value.clone());
        }
        rubro
    }

    /// Start submitting; returns the mutation to send, or `None` when the
    /// action is disabled. Marks the session busy until the result arrives.
    pub fn begin_submit(&mut self) -> Option<Mutation> {
        if self.busy {
            return None;
        }

        let mutation = match self.mode {
            ModalType::Delete => Mutation::Delete(self.target.id),
            ModalType::Create | ModalType::Update => {
                if let Err(reason) = self.form.validate() {
                    debug!("Submit blocked for session {}: {}", self.session, reason);
                    self.form.touch_all();
                    return None;
                }
                let rubro = self.values();
                if self.target.is_new() {
                    Mutation::Create(rubro)
                } else {
                    Mutation::Update(self.target.id, rubro)
                }
            }
        };

        self.busy = true;
        Some(mutation)
    }

    /// The remote call failed; the session stays open with its input intact
    pub fn submit_failed(&mut self) {
        self.busy = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ModalAction {
        if self.busy {
            return ModalAction::None;
        }

        match self.mode {
            ModalType::Delete => match key.code {
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => ModalAction::Close,
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => ModalAction::Submit,
                _ => ModalAction::None,
            },
            ModalType::Create | ModalType::Update => self.handle_form_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> ModalAction {
        match key.code {
            KeyCode::Esc => return ModalAction::Close,
            KeyCode::Enter => return ModalAction::Submit,
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.handle_char_input(c)
            }
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Left => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_right();
                }
            }
            KeyCode::Home => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_to_start();
                }
            }
            KeyCode::End => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_to_end();
                }
            }
            _ => {}
        }
        ModalAction::None
    }

    fn frame_block(&self) -> Block<'static> {
        Block::default()
            .title(Span::styled(format!(" {} ", self.title), Styles::modal_header()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Styles::active_border())
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        match self.mode {
            ModalType::Delete => self.render_delete(f, area),
            ModalType::Create | ModalType::Update => self.render_form(f, area),
        }
    }

    fn render_delete(&self, f: &mut Frame, area: Rect) {
        let popup = centered_fixed_rect(60, DIALOG_HEIGHT, area);
        f.render_widget(Clear, popup);

        let confirm = if self.busy {
            Span::styled(" Borrando... ", Styles::disabled_button())
        } else {
            Span::styled(" [Enter] Borrar ", Styles::danger_button())
        };

        let text = vec![
            Line::from("¿Está seguro que desea eliminar el Rubro"),
            Line::from(Span::styled(
                format!("{}?", self.target.denominacion),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" [Esc] Cancelar ", Styles::inactive()),
                Span::raw("  "),
                confirm,
            ]),
        ];

        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(self.frame_block());
        f.render_widget(paragraph, popup);
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let popup = centered_fixed_rect(70, FORM_HEIGHT, area);
        f.render_widget(Clear, popup);

        let block = self.frame_block();
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let mut constraints: Vec<Constraint> =
            self.form.fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in self.form.fields.iter().enumerate() {
            field.render(f, chunks[i]);
        }

        let save = if self.busy {
            Span::styled(" Guardando... ", Styles::disabled_button())
        } else if self.can_submit() {
            Span::styled(" [Enter] Guardar ", Styles::primary_button())
        } else {
            Span::styled(" [Enter] Guardar ", Styles::disabled_button())
        };

        let footer = Paragraph::new(Line::from(vec![
            Span::styled(" [Esc] Cancelar ", Styles::inactive()),
            Span::raw("  "),
            save,
        ]))
        .alignment(Alignment::Right);
        f.render_widget(footer, chunks[self.form.fields.len() + 1]);
    }
}
