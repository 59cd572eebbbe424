use serde::Serialize;

use crate::domain::notification::Notification;

#[derive(Debug, Serialize)]
pub struct NotificationsView {
    pub unread: usize,
    pub notifications: Vec<Notification>,
}
