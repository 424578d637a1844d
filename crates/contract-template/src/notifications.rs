//! Per-user notification feed
//!
//! The feed owns its transport. It is opened with [`NotificationFeed::connect`]
//! and closed by [`NotificationFeed::disconnect`] or on drop, so a session
//! never leaves a subscription behind.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collaborators::{Notifier, Toast};
use crate::errors::FeedError;

/// A notification addressed to one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

/// Push channel delivering notifications for a user
pub trait FeedTransport {
    fn open(&mut self, user_id: &str) -> Result<(), FeedError>;
    fn close(&mut self);
    /// Notifications that arrived since the last call
    fn receive(&mut self) -> Result<Vec<Notification>, FeedError>;
}

/// Notifications received for the connected user, newest first
pub struct NotificationFeed<T: FeedTransport> {
    transport: T,
    user_id: Option<String>,
    notifications: Vec<Notification>,
    seen: BTreeSet<String>,
}

impl<T: FeedTransport> NotificationFeed<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            user_id: None,
            notifications: Vec::new(),
            seen: BTreeSet::new(),
        }
    }

    pub fn connect(&mut self, user_id: &str) -> Result<(), FeedError> {
        if let Some(current) = &self.user_id {
            return Err(FeedError::AlreadyConnected(current.clone()));
        }
        self.transport.open(user_id)?;
        tracing::info!(user_id, "Notification feed connected");
        self.user_id = Some(user_id.to_string());
        Ok(())
    }

    /// Close the subscription and forget received notifications. No-op when
    /// not connected.
    pub fn disconnect(&mut self) {
        if let Some(user_id) = self.user_id.take() {
            self.transport.close();
            self.notifications.clear();
            self.seen.clear();
            tracing::info!(%user_id, "Notification feed disconnected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.user_id.is_some()
    }

    /// Pull new arrivals, toasting each one. Returns how many were new;
    /// redelivered ids are ignored.
    pub fn poll(&mut self, notifier: &mut dyn Notifier) -> Result<usize, FeedError> {
        if self.user_id.is_none() {
            return Err(FeedError::NotConnected);
        }

        let mut added = 0;
        for notification in self.transport.receive()? {
            if !self.seen.insert(notification.id.clone()) {
                tracing::trace!(id = %notification.id, "Skipping duplicate notification");
                continue;
            }
            notifier.notify(Toast::info(notification.title.clone()));
            self.notifications.insert(0, notification);
            added += 1;
        }
        Ok(added)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Returns false when no notification has this id
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }
}

impl<T: FeedTransport> Drop for NotificationFeed<T> {
    fn drop(&mut self) {
        self.disconnect();
    }
}
