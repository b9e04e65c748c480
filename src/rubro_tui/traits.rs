//! Core traits for the Rubro TUI
//!
//! Shared behavior for list navigation and form editing.

/// Actions a screen hands back to the application loop
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// Quit the application
    Quit,
    /// Toggle the help popup
    ToggleHelp,
    /// No action taken
    None,
}

/// Trait for components with navigable lists
pub trait Navigable {
    /// Move selection up
    fn navigate_up(&mut self);

    /// Move selection down
    fn navigate_down(&mut self);

    /// Get currently selected index
    fn get_selected_index(&self) -> Option<usize>;

    /// Set selected index
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Get total number of items
    fn get_item_count(&self) -> usize;

    /// Navigate to first item
    fn navigate_to_first(&mut self) {
        if self.get_item_count() > 0 {
            self.set_selected_index(Some(0));
        }
    }

    /// Navigate to last item
    fn navigate_to_last(&mut self) {
        let count = self.get_item_count();
        if count > 0 {
            self.set_selected_index(Some(count - 1));
        }
    }
}

/// Trait for form handling
pub trait FormHandler {
    /// Get current field index
    fn get_current_field(&self) -> usize;

    /// Set current field
    fn set_current_field(&mut self, field: usize);

    /// Get total number of fields
    fn get_field_count(&self) -> usize;

    /// Move to next field
    fn next_field(&mut self) {
        let current = self.get_current_field();
        let total = self.get_field_count();
        if total > 0 {
            self.set_current_field((current + 1) % total);
        }
    }

    /// Move to previous field
    fn previous_field(&mut self) {
        let current = self.get_current_field();
        let total = self.get_field_count();
        if total > 0 {
            self.set_current_field(if current == 0 { total - 1 } else { current - 1 });
        }
    }

    /// Handle character input for current field
    fn handle_char_input(&mut self, c: char);

    /// Handle backspace for current field
    fn handle_backspace(&mut self);

    /// Handle delete for current field
    fn handle_delete(&mut self);

    /// First validation error, if any
    fn validate(&self) -> Result<(), String>;
}
