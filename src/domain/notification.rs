use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{NotificationId, UserId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewNotification {
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

impl NewNotification {
    pub fn new(user_id: UserId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            body: body.into(),
        }
    }
}
