use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::notification::{
    NewNotification as DomainNewNotification, Notification as DomainNotification,
};
use crate::domain::types::{NotificationId, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::notifications)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NewNotification<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub body: &'a str,
}

impl TryFrom<Notification> for DomainNotification {
    type Error = TypeConstraintError;

    fn try_from(notification: Notification) -> Result<Self, Self::Error> {
        Ok(Self {
            id: NotificationId::try_from(notification.id)?,
            user_id: UserId::try_from(notification.user_id)?,
            title: notification.title,
            body: notification.body,
            is_read: notification.is_read,
            created_at: notification.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewNotification> for NewNotification<'a> {
    fn from(notification: &'a DomainNewNotification) -> Self {
        Self {
            user_id: notification.user_id.get(),
            title: notification.title.as_str(),
            body: notification.body.as_str(),
        }
    }
}
