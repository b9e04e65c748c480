//! Rubro Terminal User Interface (TUI)
//!
//! A single CRUD screen: the rubro table, a modal form for create/update,
//! a confirmation dialog for delete, and toast notifications.

pub mod app;
pub mod components;
pub mod events;
pub mod modal;
pub mod screen;
pub mod table;
pub mod traits;
pub mod ui;

pub use app::App;
pub use events::AppEvent;
pub use screen::RubroScreen;
