//! Queue of transient user-visible messages.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::types::notification::Notification;

/// Collects notifications raised by the controllers until the UI drains them.
#[derive(Default)]
pub struct NotificationCenter {
    queue: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, notification: Notification) {
        debug!("notify {:?}: {}", notification.level, notification.message);
        self.lock().push(notification);
    }

    /// Removes and returns every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    /// Pending notifications without removing them.
    pub fn pending(&self) -> Vec<Notification> {
        self.lock().clone()
    }
}
