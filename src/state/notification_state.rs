//! Notification inbox state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification shown in the inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique id. Uniqueness is the producer's responsibility.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Whether the user has seen it.
    pub read: bool,
    /// When it was produced.
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification with a fresh id.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            message: message.into(),
            read: false,
            timestamp: Utc::now(),
        }
    }

    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Notifications, most recent first, with the unread counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    items: Vec<Notification>,
    unread_count: usize,
}

impl NotificationState {
    /// All notifications, most recent first.
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.unread_count
    }

    /// Look up a notification.
    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Prepend a notification.
    pub fn add(&mut self, notification: Notification) {
        if !notification.read {
            self.unread_count += 1;
        }
        self.items.insert(0, notification);
    }

    /// Mark one notification read. Unknown or already-read ids are ignored.
    pub fn mark_as_read(&mut self, id: &str) {
        if let Some(n) = self.items.iter_mut().find(|n| n.id == id && !n.read) {
            n.read = true;
            self.unread_count = self.unread_count.saturating_sub(1);
        }
    }

    /// Mark every notification read.
    pub fn mark_all_as_read(&mut self) {
        for n in &mut self.items {
            n.read = true;
        }
        self.unread_count = 0;
    }

    /// Remove one notification.
    pub fn remove(&mut self, id: &str) {
        if let Some(pos) = self.items.iter().position(|n| n.id == id) {
            let removed = self.items.remove(pos);
            if !removed.read {
                self.unread_count = self.unread_count.saturating_sub(1);
            }
        }
    }

    /// Drop every notification.
    pub fn clear(&mut self) {
        self.items.clear();
        self.unread_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unread(state: &NotificationState) -> usize {
        state.items().iter().filter(|n| !n.read).count()
    }

    #[test]
    fn test_add_prepends() {
        let mut state = NotificationState::default();
        state.add(Notification::new("a", "").with_id("n1"));
        state.add(Notification::new("b", "").with_id("n2"));

        let ids: Vec<_> = state.items().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n2", "n1"]);
        assert_eq!(state.unread_count(), 2);
    }

    #[test]
    fn test_mark_as_read_twice_counts_once() {
        let mut state = NotificationState::default();
        state.add(Notification::new("a", "").with_id("n1"));
        state.add(Notification::new("b", "").with_id("n2"));

        state.mark_as_read("n1");
        state.mark_as_read("n1");
        assert_eq!(state.unread_count(), 1);
        assert_eq!(state.unread_count(), unread(&state));
    }

    #[test]
    fn test_mark_unknown_is_noop() {
        let mut state = NotificationState::default();
        state.add(Notification::new("a", "").with_id("n1"));
        let before = state.clone();
        state.mark_as_read("missing");
        assert_eq!(state, before);
    }

    #[test]
    fn test_already_read_does_not_count() {
        let mut state = NotificationState::default();
        let mut n = Notification::new("seen", "");
        n.read = true;
        state.add(n);
        assert_eq!(state.unread_count(), 0);
    }

    #[test]
    fn test_mark_all_and_clear() {
        let mut state = NotificationState::default();
        for i in 0..3 {
            state.add(Notification::new(format!("t{i}"), "").with_id(format!("n{i}")));
        }
        state.mark_all_as_read();
        assert_eq!(state.unread_count(), 0);
        assert!(state.items().iter().all(|n| n.read));

        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.unread_count(), 0);
    }

    #[test]
    fn test_remove_adjusts_unread() {
        let mut state = NotificationState::default();
        state.add(Notification::new("a", "").with_id("n1"));
        state.add(Notification::new("b", "").with_id("n2"));
        state.mark_as_read("n2");

        state.remove("n2");
        assert_eq!(state.unread_count(), 1);
        state.remove("n1");
        assert_eq!(state.unread_count(), 0);
        assert!(state.get("n1").is_none());
    }
}
