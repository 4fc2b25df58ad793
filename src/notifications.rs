use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

/// How long a settled notification stays on screen.
pub const SETTLED_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    /// `None` while loading: it stays up until it is settled.
    pub duration: Option<Duration>,
    pub settled_at: Option<Instant>,
}

impl Notification {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match (self.settled_at, self.duration) {
            (Some(settled_at), Some(duration)) => now.saturating_duration_since(settled_at) >= duration,
            _ => false,
        }
    }
}

/// Toast-style notifications shown to the user.
///
/// A submission opens one notification with [`Notifications::loading`] and
/// settles the same entry in place, so a submit never stacks toasts.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a loading notification. Expired entries are dropped first.
    pub fn loading(&self, title: &str, description: &str) -> NotificationId {
        let id = NotificationId(Uuid::new_v4());
        let mut entries = self.entries();
        let now = Instant::now();
        entries.retain(|n| !n.is_expired_at(now));
        entries.push(Notification {
            id,
            kind: NotificationKind::Loading,
            title: title.into(),
            description: description.into(),
            duration: None,
            settled_at: None,
        });
        id
    }

    pub fn success(&self, id: NotificationId, title: &str, description: &str) {
        self.settle(id, NotificationKind::Success, title, description)
    }

    pub fn error(&self, id: NotificationId, title: &str, description: &str) {
        self.settle(id, NotificationKind::Error, title, description)
    }

    /// Close a notification before its duration runs out.
    pub fn dismiss(&self, id: NotificationId) {
        self.entries().retain(|n| n.id != id);
    }

    /// Drop settled notifications whose display duration has run out.
    pub fn prune_expired(&self) {
        self.prune_expired_at(Instant::now())
    }

    fn prune_expired_at(&self, now: Instant) {
        self.entries().retain(|n| !n.is_expired_at(now));
    }

    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        self.entries().iter().find(|n| n.id == id).cloned()
    }

    /// Every notification, oldest first.
    pub fn all(&self) -> Vec<Notification> {
        self.entries().clone()
    }

    pub fn latest(&self) -> Option<Notification> {
        self.entries().last().cloned()
    }

    fn settle(&self, id: NotificationId, kind: NotificationKind, title: &str, description: &str) {
        let settled = Notification {
            id,
            kind,
            title: title.into(),
            description: description.into(),
            duration: Some(SETTLED_DURATION),
            settled_at: Some(Instant::now()),
        };
        let mut entries = self.entries();
        match entries.iter_mut().find(|n| n.id == id) {
            Some(entry) => *entry = settled,
            None => entries.push(settled),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
