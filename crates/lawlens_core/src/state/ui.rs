//! crates/lawlens_core/src/state/ui.rs
//!
//! UI chrome and the bounded notification queue. Nothing in this slice is
//! ever persisted.

use crate::domain::{Notification, NotificationKind};

/// The queue keeps only the five most recent notifications.
pub const MAX_NOTIFICATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Transient UI state: theme, chrome toggles and the notification queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub theme: Theme,
    pub sidebar_open: bool,
    pub active_modal: Option<String>,
    pub notifications: Vec<Notification>,
}

impl UiState {
    /// Inserts a notification at the front (newest first) and truncates the
    /// queue to `MAX_NOTIFICATIONS`, discarding the oldest beyond the bound.
    /// Returns the assigned id.
    pub fn push_notification(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> String {
        let notification = Notification::new(kind, message);
        let id = notification.id.clone();
        self.notifications.insert(0, notification);
        self.notifications.truncate(MAX_NOTIFICATIONS);
        id
    }

    /// Removes the notification with this id. Dismissing an absent id is a
    /// no-op, not an error.
    pub fn dismiss_notification(&mut self, id: &str) {
        self.notifications.retain(|n| n.id != id);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn open_modal(&mut self, name: impl Into<String>) {
        self.active_modal = Some(name.into());
    }

    pub fn close_modal(&mut self) {
        self.active_modal = None;
    }
}
