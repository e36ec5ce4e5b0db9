//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::NotificationType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub message: String,
    #[serde(default)]
    pub notification_type: NotificationType,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response of `notifications/unread-count/`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct UnreadCount {
    pub unread_count: u32,
}
