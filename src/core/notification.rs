//! # Notifications
//!
//! One transient error message at a time. Setting a message always schedules
//! its own expiry; an expiry only clears the notification it was scheduled
//! for. Comparison is by id, never by text, so repeating the same error
//! still gets a fresh full delay.

use std::time::Duration;

use crate::core::command::{Command, NotificationId};

/// Default time a notification stays on screen.
pub const DEFAULT_NOTIFICATION_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    last_id: NotificationId,
    delay: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_DELAY)
    }
}

impl Notifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            current: None,
            last_id: 0,
            delay,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.message.as_str())
    }

    /// Replaces any current notification and returns the command that will expire it.
    pub fn set_error(&mut self, message: impl Into<String>) -> Command {
        self.last_id += 1;
        let id = self.last_id;
        self.current = Some(Notification {
            id,
            message: message.into(),
        });
        Command::ExpireNotification {
            id,
            delay: self.delay,
        }
    }

    /// Clears the notification if `id` is still the one showing. Returns whether it did.
    pub fn expire(&mut self, id: NotificationId) -> bool {
        match &self.current {
            Some(n) if n.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}
