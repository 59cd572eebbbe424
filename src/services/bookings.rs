use chrono::NaiveDateTime;
use validator::Validate;

use crate::domain::booking::{Booking, BookingStatus, NewBooking};
use crate::domain::notification::NewNotification;
use crate::domain::types::{BookingId, ProviderId};
use crate::forms::FormError;
use crate::forms::bookings::CreateBookingForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{BookingReader, BookingWriter, NotificationWriter, ProviderReader};
use crate::services::{ServiceError, ServiceResult};

/// Books an active provider for a future slot at the provider's base price.
pub fn create_booking<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateBookingForm,
    now: NaiveDateTime,
) -> ServiceResult<Booking>
where
    R: ProviderReader + BookingWriter + NotificationWriter + ?Sized,
{
    form.validate().map_err(FormError::from)?;

    if form.scheduled_at <= now {
        return Err(ServiceError::Validation(
            "Booking time must be in the future".to_string(),
        ));
    }

    let provider_id = ProviderId::new(form.provider_id)?;
    let provider = repo
        .get_provider_by_id(provider_id)?
        .filter(|provider| provider.is_active)
        .ok_or(ServiceError::NotFound)?;

    let notes = form
        .notes
        .map(|notes| ammonia::clean(notes.trim()))
        .filter(|notes| !notes.is_empty());

    let booking = repo
        .create_booking(&NewBooking {
            user_id: user.id,
            provider_id,
            scheduled_at: form.scheduled_at,
            notes,
            amount_cents: provider.price_from_cents,
        })
        .map_err(|err| {
            log::error!("Failed to create booking: {err}");
            err
        })?;

    let notification = NewNotification::new(
        user.id,
        "Booking requested",
        format!(
            "Your booking with {} on {} is waiting for confirmation.",
            provider.name,
            booking.scheduled_at.format("%Y-%m-%d %H:%M")
        ),
    );
    if let Err(err) = repo.create_notification(&notification) {
        log::error!("Failed to create booking notification: {err}");
    }

    Ok(booking)
}

pub fn list_bookings<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Booking>>
where
    R: BookingReader + ?Sized,
{
    repo.list_user_bookings(user.id)
        .map_err(ServiceError::from)
}

/// Cancels one of the caller's own bookings while it is still open.
pub fn cancel_booking<R>(
    repo: &R,
    user: &AuthenticatedUser,
    booking_id: i32,
) -> ServiceResult<Booking>
where
    R: BookingReader + BookingWriter + ?Sized,
{
    let booking_id = BookingId::new(booking_id)?;
    let booking = repo
        .get_booking_by_id(booking_id)?
        .filter(|booking| booking.user_id == user.id)
        .ok_or(ServiceError::NotFound)?;

    if !booking.status.can_cancel() {
        return Err(ServiceError::Conflict(format!(
            "A {} booking cannot be cancelled",
            booking.status
        )));
    }

    repo.set_booking_status(booking_id, booking.status, BookingStatus::Cancelled)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::notification::Notification;
    use crate::domain::provider::Provider;
    use crate::domain::types::{NotificationId, ProviderName, SubcategoryId, UserId};
    use crate::repository::mock::MockRepository;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(2).unwrap(),
            email: "c@example.com".to_string(),
            roles: vec!["customer".to_string()],
        }
    }

    fn provider(active: bool) -> Provider {
        Provider {
            id: ProviderId::new(8).unwrap(),
            subcategory_id: SubcategoryId::new(1).unwrap(),
            name: ProviderName::new("Sparkle Cleaners").unwrap(),
            description: None,
            phone: None,
            rating: 4.7,
            review_count: 31,
            price_from_cents: 4_500,
            is_verified: true,
            is_active: active,
            created_at: now(),
        }
    }

    fn booking(status: BookingStatus, owner: i32) -> Booking {
        Booking {
            id: BookingId::new(11).unwrap(),
            user_id: UserId::new(owner).unwrap(),
            provider_id: ProviderId::new(8).unwrap(),
            scheduled_at: now() + Duration::days(1),
            status,
            notes: None,
            amount_cents: 4_500,
            created_at: now(),
        }
    }

    fn form(scheduled_at: NaiveDateTime) -> CreateBookingForm {
        CreateBookingForm {
            provider_id: 8,
            scheduled_at,
            notes: Some("Gate code <b>42</b><script>x()</script>".to_string()),
        }
    }

    #[test]
    fn past_slots_are_rejected() {
        let repo = MockRepository::new();
        let result = create_booking(&repo, &user(), form(now() - Duration::hours(1)), now());
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn inactive_provider_cannot_be_booked() {
        let mut repo = MockRepository::new();
        repo.expect_get_provider_by_id()
            .returning(|_| Ok(Some(provider(false))));

        let result = create_booking(&repo, &user(), form(now() + Duration::days(2)), now());

        assert_eq!(result, Err(ServiceError::NotFound));
    }

    #[test]
    fn booking_uses_provider_price_and_notifies() {
        let mut repo = MockRepository::new();
        repo.expect_get_provider_by_id()
            .with(eq(ProviderId::new(8).unwrap()))
            .returning(|_| Ok(Some(provider(true))));
        repo.expect_create_booking()
            .withf(|new| {
                new.amount_cents == 4_500
                    && new.notes.as_deref() == Some("Gate code <b>42</b>")
            })
            .returning(|new| {
                Ok(Booking {
                    scheduled_at: new.scheduled_at,
                    ..booking(BookingStatus::Pending, 2)
                })
            });
        repo.expect_create_notification()
            .times(1)
            .withf(|n| n.title == "Booking requested" && n.body.contains("Sparkle Cleaners"))
            .returning(|n| {
                Ok(Notification {
                    id: NotificationId::new(1).unwrap(),
                    user_id: n.user_id,
                    title: n.title.clone(),
                    body: n.body.clone(),
                    is_read: false,
                    created_at: now(),
                })
            });

        let created =
            create_booking(&repo, &user(), form(now() + Duration::days(2)), now()).unwrap();

        assert_eq!(created.status, BookingStatus::Pending);
    }

    #[test]
    fn completed_booking_cannot_be_cancelled() {
        let mut repo = MockRepository::new();
        repo.expect_get_booking_by_id()
            .returning(|_| Ok(Some(booking(BookingStatus::Completed, 2))));

        let result = cancel_booking(&repo, &user(), 11);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn other_users_bookings_are_hidden() {
        let mut repo = MockRepository::new();
        repo.expect_get_booking_by_id()
            .returning(|_| Ok(Some(booking(BookingStatus::Pending, 99))));

        assert_eq!(
            cancel_booking(&repo, &user(), 11),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn pending_booking_is_cancelled() {
        let mut repo = MockRepository::new();
        repo.expect_get_booking_by_id()
            .returning(|_| Ok(Some(booking(BookingStatus::Pending, 2))));
        repo.expect_set_booking_status()
            .with(
                eq(BookingId::new(11).unwrap()),
                eq(BookingStatus::Pending),
                eq(BookingStatus::Cancelled),
            )
            .returning(|_, _, status| Ok(booking(status, 2)));

        let cancelled = cancel_booking(&repo, &user(), 11).unwrap();

        assert_eq!(cancelled.status, BookingStatus::Cancelled);
    }
}
