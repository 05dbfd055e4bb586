//! Loading flag and user-facing notifications
//!
//! Owned by the App and shared with every view through explicit borrows.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Generic text for failures that carry no backend message
pub const GENERIC_ERROR_MESSAGE: &str = "Se ha producido un error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub kind: NotificationKind,
    /// Set when the notification first becomes visible
    shown_at: Option<Instant>,
}

impl Notification {
    pub fn new(text: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            text: text.into(),
            kind,
            shown_at: None,
        }
    }
}

/// FIFO of notifications; only the front one is displayed
#[derive(Debug)]
pub struct NotificationQueue {
    queue: VecDeque<Notification>,
    display_for: Duration,
}

impl NotificationQueue {
    pub fn new(display_for: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            display_for,
        }
    }

    pub fn push_ok(&mut self, text: impl Into<String>) {
        self.queue.push_back(Notification::new(text, NotificationKind::Ok));
    }

    pub fn push_error(&mut self, text: impl Into<String>) {
        self.queue.push_back(Notification::new(text, NotificationKind::Error));
    }

    /// Notification currently on screen
    pub fn current(&self) -> Option<&Notification> {
        self.queue.front()
    }

    pub fn dismiss(&mut self) {
        self.queue.pop_front();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Start the display clock of the front notification and drop it once
    /// its time is up
    pub fn expire(&mut self, now: Instant) {
        let Some(front) = self.queue.front_mut() else {
            return;
        };
        match front.shown_at {
            None => front.shown_at = Some(now),
            Some(shown_at) if now.duration_since(shown_at) >= self.display_for => {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.shown_at = Some(now);
                }
            }
            Some(_) => {}
        }
    }

    /// All queued texts, oldest first
    pub fn texts(&self) -> Vec<&str> {
        self.queue.iter().map(|n| n.text.as_str()).collect()
    }
}

/// Cross-cutting UI context: the loading flag and the notification queue
#[derive(Debug)]
pub struct UiContext {
    loading: bool,
    pub notifications: NotificationQueue,
}

impl UiContext {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            loading: false,
            notifications: NotificationQueue::new(notification_ttl),
        }
    }

    pub fn show_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
