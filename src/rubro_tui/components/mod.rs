//! Reusable UI components for the Rubro TUI

pub mod form_field;
pub mod loader;
pub mod notifications;

pub use form_field::{Form, FormField, FormFieldType};
pub use loader::Loader;
pub use notifications::{Notification, NotificationKind, Notifications, ToastPosition};
