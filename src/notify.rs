//! Short-lived user notifications ("toasts").
//!
//! The stores report every confirmed write and every failure through the [`Reporter`] seam;
//! the [`Notifier`] turns those into [`Notification`]s, broadcasts them and keeps the latest
//! one visible until it auto-dismisses.

use actor_framework::{FrameworkError, Reporter};
use std::fmt::Display;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub shown_at: Instant,
}

impl Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.level {
            Level::Success => "ok",
            Level::Error => "error",
            Level::Info => "info",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

pub struct Notifier {
    sender: broadcast::Sender<Notification>,
    latest: Mutex<Option<Notification>>,
    dismiss_after: Duration,
}

impl Notifier {
    pub fn new(dismiss_after: Duration, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            latest: Mutex::new(None),
            dismiss_after,
        }
    }

    pub fn notify(&self, level: Level, message: impl Into<String>) {
        let notification = Notification {
            level,
            message: message.into(),
            shown_at: Instant::now(),
        };
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(notification.clone());
        // Nobody listening is fine; `current` still has it.
        let _ = self.sender.send(notification);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(Level::Info, message);
    }

    /// The notification on screen, if it has not been dismissed yet.
    pub fn current(&self) -> Option<Notification> {
        let latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        latest
            .as_ref()
            .filter(|n| n.shown_at.elapsed() < self.dismiss_after)
            .cloned()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

/// Text shown for a failed store operation: remote failures get the short user-facing
/// message, domain and validation errors their own text.
pub fn failure_message(error: &FrameworkError) -> String {
    match error {
        FrameworkError::Remote(remote) => remote.user_message().to_string(),
        FrameworkError::EntityError(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

impl Reporter for Notifier {
    fn success(&self, message: String) {
        self.notify(Level::Success, message);
    }

    fn failure(&self, error: &FrameworkError) {
        self.notify(Level::Error, failure_message(error));
    }
}
