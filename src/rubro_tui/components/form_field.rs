//! Form field component for user input

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::parse_compact_date;
use crate::rubro_tui::{
    traits::FormHandler,
    ui::{display_width, Styles},
};

pub const REQUIRED_MESSAGE: &str = "El dato es requerido";

/// Type of form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldType {
    Text,
    /// Digits-only input holding a `YYYYMMDD` date
    Date,
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub field_type: FormFieldType,
    pub is_focused: bool,
    /// Cursor position in characters, not bytes
    pub cursor_position: usize,
    pub required: bool,
    /// Set once the user has left the field; errors are only shown after that
    pub touched: bool,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            field_type,
            is_focused: false,
            cursor_position: 0,
            required: false,
            touched: false,
            validation_error: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor_position = value.chars().count();
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        if self.field_type == FormFieldType::Date && !c.is_ascii_digit() {
            return;
        }
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor_position += 1;
        self.validate();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let idx = self.byte_index();
            self.value.remove(idx);
            self.validate();
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.char_count() {
            let idx = self.byte_index();
            self.value.remove(idx);
            self.validate();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_count();
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Mark the field as visited and re-run validation
    pub fn blur(&mut self) {
        self.touched = true;
        self.validate();
    }

    /// Validation result without touching field state
    pub fn check(&self) -> Option<String> {
        if self.required && self.is_empty() {
            return Some(REQUIRED_MESSAGE.to_string());
        }
        None
    }

    /// Validate field value
    pub fn validate(&mut self) -> bool {
        self.validation_error = self.check();
        self.validation_error.is_none()
    }

    /// Error to display next to the field
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched {
            self.validation_error.as_deref()
        } else {
            None
        }
    }

    fn title(&self) -> String {
        let mut title = self.label.clone();
        if self.field_type == FormFieldType::Date {
            if let Some(date) = parse_compact_date(&self.value) {
                title = format!("{} ({})", title, date.format("%Y-%m-%d"));
            }
        }
        if let Some(error) = self.visible_error() {
            title = format!("{} - {}", title, error);
        }
        title
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.visible_error().is_some() {
            Styles::error()
        } else if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(border_style);

        let paragraph = Paragraph::new(self.value.clone())
            .style(Styles::default())
            .block(block);

        f.render_widget(paragraph, area);

        if self.is_focused && area.width > 2 {
            let cursor_x = area.x + 1 + display_width(&self.value, self.cursor_position) as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Form container that manages multiple fields
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            current_field: 0,
        };
        form.update_focus();
        form.validate_all();
        form
    }

    fn update_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(i == self.current_field);
        }
    }

    pub fn get_current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    /// Validate all fields, returning whether every field passed
    pub fn validate_all(&mut self) -> bool {
        let mut all_valid = true;
        for field in &mut self.fields {
            if !field.validate() {
                all_valid = false;
            }
        }
        all_valid
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|field| field.check().is_none())
    }

    /// Mark every field as touched so all errors become visible
    pub fn touch_all(&mut self) {
        for field in &mut self.fields {
            field.blur();
        }
    }
}

impl FormHandler for Form {
    fn get_current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() && field != self.current_field {
            if let Some(previous) = self.fields.get_mut(self.current_field) {
                previous.blur();
            }
            self.current_field = field;
            self.update_focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.get_current_field_mut() {
            field.insert_char(c);
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char_forward();
        }
    }

    fn validate(&self) -> Result<(), String> {
        for field in &self.fields {
            if let Some(error) = field.check() {
                return Err(format!("{}: {}", field.label, error));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_field_form() -> Form {
        Form::new(vec![
            FormField::new("Nombre", FormFieldType::Text).required(),
            FormField::new("Fecha", FormFieldType::Date).required(),
        ])
    }

    #[test]
    fn test_editing_handles_multibyte_characters() {
        let mut field = FormField::new("Rubro Padre", FormFieldType::Text).with_value("Almacn");
        field.move_cursor_left();
        field.insert_char('é');
        assert_eq!(field.value, "Almacén");

        field.move_cursor_to_end();
        field.delete_char();
        field.delete_char();
        assert_eq!(field.value, "Almac");
    }

    #[test]
    fn test_date_field_accepts_digits_only() {
        let mut field = FormField::new("Fecha Alta", FormFieldType::Date);
        for c in "2024-01a01".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value, "20240101");
        assert_eq!(field.title(), "Fecha Alta (2024-01-01)");
    }

    #[test]
    fn test_required_error_only_visible_after_blur() {
        let mut field = FormField::new("Nombre", FormFieldType::Text).required();
        assert!(!field.validate());
        assert_eq!(field.visible_error(), None);

        field.blur();
        assert_eq!(field.visible_error(), Some(REQUIRED_MESSAGE));

        field.insert_char('x');
        assert_eq!(field.visible_error(), None);
    }

    #[test]
    fn test_whitespace_only_value_is_empty() {
        let field = FormField::new("Nombre", FormFieldType::Text)
            .required()
            .with_value("   ");
        assert_eq!(field.check(), Some(REQUIRED_MESSAGE.to_string()));
    }

    #[test]
    fn test_moving_focus_blurs_previous_field() {
        let mut form = two_field_form();
        assert!(!form.fields[0].touched);

        form.next_field();
        assert_eq!(form.get_current_field(), 1);
        assert!(form.fields[0].touched);
        assert!(form.fields[1].is_focused);
        assert!(!form.fields[0].is_focused);

        form.next_field();
        assert_eq!(form.get_current_field(), 0);
    }

    #[test]
    fn test_form_validity_tracks_every_field() {
        let mut form = two_field_form();
        assert!(!form.is_valid());

        form.handle_char_input('B');
        assert!(!form.is_valid());
        assert_eq!(form.validate(), Err("Fecha: El dato es requerido".to_string()));

        form.next_field();
        form.handle_char_input('1');
        assert!(form.is_valid());

        form.handle_backspace();
        assert!(!form.is_valid());
    }
}
