//! Toast notifications: fire-and-forget, auto-dismissing messages

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

use crate::rubro_tui::ui::Styles;

pub const GENERIC_ERROR: &str = "Ha ocurrido un error";

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 3;
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Where a toast is drawn; purely cosmetic
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastPosition {
    TopCenter,
    TopRight,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub position: ToastPosition,
    pub created_at: DateTime<Local>,
}

impl Notification {
    pub fn new(message: &str, kind: NotificationKind, position: ToastPosition) -> Self {
        Self {
            message: message.to_string(),
            kind,
            position,
            created_at: Local::now(),
        }
    }

    fn is_expired(&self, now: DateTime<Local>, timeout: Duration) -> bool {
        now.signed_duration_since(self.created_at)
            .to_std()
            .map(|elapsed| elapsed >= timeout)
            .unwrap_or(false)
    }
}

/// Toasts currently on screen
pub struct Notifications {
    pub active: Vec<Notification>,
    pub timeout: Duration,
}

impl Notifications {
    pub fn new(timeout: Duration) -> Self {
        Self {
            active: Vec::new(),
            timeout,
        }
    }

    pub fn push(&mut self, notification: Notification) {
        self.active.push(notification);
    }

    pub fn success(&mut self, message: &str, position: ToastPosition) {
        self.push(Notification::new(message, NotificationKind::Success, position));
    }

    pub fn error(&mut self, message: &str) {
        self.push(Notification::new(
            message,
            NotificationKind::Error,
            ToastPosition::TopRight,
        ));
    }

    /// Drop toasts older than the timeout
    pub fn prune(&mut self, now: DateTime<Local>) {
        let timeout = self.timeout;
        self.active.retain(|n| !n.is_expired(now, timeout));
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.active.iter().filter(|n| n.kind == kind).count()
    }

    /// Render the newest toasts stacked from the top of `area`
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let mut stacked_center = 0u16;
        let mut stacked_right = 0u16;

        for notification in self.active.iter().rev().take(MAX_VISIBLE) {
            let width = TOAST_WIDTH.min(area.width);
            let (x, slot) = match notification.position {
                ToastPosition::TopCenter => {
                    (area.x + (area.width - width) / 2, &mut stacked_center)
                }
                ToastPosition::TopRight => (area.x + area.width - width, &mut stacked_right),
            };
            let y = area.y + *slot * TOAST_HEIGHT;
            if y + TOAST_HEIGHT > area.y + area.height {
                continue;
            }
            *slot += 1;

            let toast_area = Rect::new(x, y, width, TOAST_HEIGHT);
            let (prefix, style) = match notification.kind {
                NotificationKind::Success => ("✓", Styles::success()),
                NotificationKind::Error => ("✗", Styles::error()),
            };

            let paragraph = Paragraph::new(format!("{} {}", prefix, notification.message))
                .style(style)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).border_style(style));

            f.render_widget(Clear, toast_area);
            f.render_widget(paragraph, toast_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_drops_expired_toasts() {
        let mut notifications = Notifications::new(Duration::from_secs(5));
        notifications.success("Rubro creado", ToastPosition::TopCenter);
        notifications.error(GENERIC_ERROR);

        notifications.prune(Local::now());
        assert_eq!(notifications.active.len(), 2);

        notifications.active[0].created_at = Local::now() - chrono::Duration::seconds(6);
        notifications.prune(Local::now());
        assert_eq!(notifications.active.len(), 1);
        assert_eq!(notifications.active[0].message, GENERIC_ERROR);

        notifications.prune(Local::now() + chrono::Duration::seconds(6));
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_count_by_kind() {
        let mut notifications = Notifications::new(Duration::from_secs(5));
        notifications.error(GENERIC_ERROR);
        notifications.error(GENERIC_ERROR);
        notifications.success("Rubro borrado", ToastPosition::TopCenter);

        assert_eq!(notifications.count(NotificationKind::Error), 2);
        assert_eq!(notifications.count(NotificationKind::Success), 1);
        assert_eq!(notifications.active[0].position, ToastPosition::TopRight);
    }
}
