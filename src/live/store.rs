//! Capped, ordered notification collection
//!
//! One store per tenant, owned by the caller (typically behind an
//! `Arc<RwLock<_>>` shared with a polling manager). Most recent first,
//! bounded at [`NOTIFICATION_CAPACITY`] entries.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::Notification;

/// Maximum number of notifications kept; older entries are evicted first
pub const NOTIFICATION_CAPACITY: usize = 50;

/// Ordered most-recent-first notification buffer with read/unread state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationStore {
    notifications: VecDeque<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a notification, evicting the oldest entries beyond capacity
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_front(notification);
        self.notifications.truncate(NOTIFICATION_CAPACITY);
    }

    /// Snapshot of all notifications, most recent first
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.iter().cloned().collect()
    }

    /// Mark one notification as read. Returns whether the id was found;
    /// marking an already-read notification again is a no-op.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    /// Mark every notification as read
    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }

    /// Remove one notification by id. Returns whether the id was found.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    /// Remove every notification already marked as read
    pub fn clear_read(&mut self) {
        self.notifications.retain(|n| !n.read);
    }

    /// Number of unread notifications
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}
