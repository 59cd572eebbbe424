use diesel::prelude::*;

use crate::domain::notification::{NewNotification, Notification};
use crate::domain::types::{NotificationId, UserId};
use crate::models::notification::{
    NewNotification as DbNewNotification, Notification as DbNotification,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, NotificationReader, NotificationWriter};

impl NotificationReader for DieselRepository {
    fn list_notifications(&self, user_id: UserId) -> RepositoryResult<Vec<Notification>> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        notifications::table
            .filter(notifications::user_id.eq(user_id.get()))
            .order((notifications::created_at.desc(), notifications::id.desc()))
            .load::<DbNotification>(&mut conn)?
            .into_iter()
            .map(|n| Notification::try_from(n).map_err(RepositoryError::from))
            .collect()
    }
}

impl NotificationWriter for DieselRepository {
    fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> RepositoryResult<Notification> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        let db_new: DbNewNotification = notification.into();
        let created = diesel::insert_into(notifications::table)
            .values(&db_new)
            .get_result::<DbNotification>(&mut conn)?;

        Notification::try_from(created).map_err(RepositoryError::from)
    }

    fn mark_notification_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> RepositoryResult<bool> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        let updated = diesel::update(
            notifications::table
                .filter(notifications::id.eq(id.get()))
                .filter(notifications::user_id.eq(user_id.get())),
        )
        .set(notifications::is_read.eq(true))
        .execute(&mut conn)?;

        Ok(updated > 0)
    }
}
