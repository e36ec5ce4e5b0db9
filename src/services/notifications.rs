//! Notification inbox and the unread badge feed

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::{
    api::notifications::NotificationsApi,
    error::ClientResult,
    models::Notification,
};

use super::poller::{PollFeed, PollHandle, Poller};

#[derive(Clone)]
pub struct NotificationCenter {
    api: NotificationsApi,
    period: Duration,
    items: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationCenter {
    pub fn new(api: NotificationsApi, period: Duration) -> Self {
        Self {
            api,
            period,
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn load(&self) -> ClientResult<usize> {
        let items = self.api.list().await?;
        let count = items.len();
        *self.items() = items;
        Ok(count)
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.items().clone()
    }

    /// Unread count of the loaded inbox
    pub fn unread(&self) -> usize {
        self.items().iter().filter(|n| !n.is_read).count()
    }

    /// Poll the server's unread count every period
    pub fn watch_unread(&self) -> (PollHandle, PollFeed<u32>) {
        let api = self.api.clone();
        Poller::spawn("unread notifications", self.period, move || {
            let api = api.clone();
            async move { api.unread_count().await }
        })
    }

    pub async fn mark_read(&self, id: i64) -> ClientResult<()> {
        let was_unread = self.set_read(|n| n.id == id, true) > 0;
        if let Err(e) = self.api.mark_read(id).await {
            if was_unread {
                self.set_read(|n| n.id == id, false);
            }
            return Err(e);
        }
        Ok(())
    }

    pub async fn mark_all_read(&self) -> ClientResult<()> {
        let unread: Vec<i64> = self
            .items()
            .iter()
            .filter(|n| !n.is_read)
            .map(|n| n.id)
            .collect();
        self.set_read(|_| true, true);
        if let Err(e) = self.api.mark_all_read().await {
            tracing::warn!("Marking notifications read failed, reverting: {}", e);
            self.set_read(|n| unread.contains(&n.id), false);
            return Err(e);
        }
        Ok(())
    }

    /// Set `is_read` on matching notifications; returns how many changed
    fn set_read(&self, matches: impl Fn(&Notification) -> bool, read: bool) -> usize {
        let mut changed = 0;
        for notification in self.items().iter_mut().filter(|n| matches(n)) {
            if notification.is_read != read {
                notification.is_read = read;
                changed += 1;
            }
        }
        changed
    }

    fn items(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
