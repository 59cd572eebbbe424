use crate::domain::types::NotificationId;
use crate::dto::notifications::NotificationsView;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{NotificationReader, NotificationWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn list_notifications<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<NotificationsView>
where
    R: NotificationReader + ?Sized,
{
    let notifications = repo.list_notifications(user.id).map_err(|err| {
        log::error!("Failed to list notifications: {err}");
        err
    })?;
    let unread = notifications.iter().filter(|n| !n.is_read).count();

    Ok(NotificationsView {
        unread,
        notifications,
    })
}

pub fn mark_read<R>(repo: &R, user: &AuthenticatedUser, notification_id: i32) -> ServiceResult<()>
where
    R: NotificationWriter + ?Sized,
{
    let notification_id = NotificationId::new(notification_id)?;
    if repo.mark_notification_read(notification_id, user.id)? {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::notification::Notification;
    use crate::domain::types::UserId;
    use crate::repository::mock::MockRepository;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(1).unwrap(),
            email: "n@example.com".to_string(),
            roles: vec![],
        }
    }

    fn notification(id: i32, is_read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id).unwrap(),
            user_id: UserId::new(1).unwrap(),
            title: "Ride #1".to_string(),
            body: "On the way to your destination.".to_string(),
            is_read,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn counts_unread() {
        let mut repo = MockRepository::new();
        repo.expect_list_notifications().returning(|_| {
            Ok(vec![
                notification(3, false),
                notification(2, true),
                notification(1, false),
            ])
        });

        let view = list_notifications(&repo, &user()).unwrap();

        assert_eq!(view.unread, 2);
        assert_eq!(view.notifications.len(), 3);
    }

    #[test]
    fn foreign_notification_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_mark_notification_read()
            .returning(|_, _| Ok(false));

        assert_eq!(mark_read(&repo, &user(), 5), Err(ServiceError::NotFound));
    }
}
