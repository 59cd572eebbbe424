//! Taxi ride lifecycle.
//!
//! Rides move strictly forward through
//! `requesting -> driver_assigned -> driver_arriving -> pickup -> in_transit -> completed`.
//! Riders may cancel until the driver reaches the pickup point. Every change
//! notifies the rider; completion also credits reward points for the fare.

use crate::domain::notification::NewNotification;
use crate::domain::rewards::{NewRewardEvent, points_for_spend};
use crate::domain::ride::{Ride, RideStatus, RideStatusChange};
use crate::domain::types::{Amount, RideId, UserRole};
use crate::dto::rides::RideView;
use crate::forms::rides::{AdvanceRideForm, RequestRideForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{NotificationWriter, RewardWriter, RideReader, RideWriter};
use crate::services::{ServiceError, ServiceResult};

fn is_dispatcher(user: &AuthenticatedUser) -> bool {
    user.has_role(UserRole::Driver) || user.has_role(UserRole::Admin)
}

fn load_visible_ride<R>(repo: &R, user: &AuthenticatedUser, ride_id: i32) -> ServiceResult<Ride>
where
    R: RideReader + ?Sized,
{
    let ride_id = RideId::new(ride_id)?;
    repo.get_ride_by_id(ride_id)?
        .filter(|ride| ride.user_id == user.id || is_dispatcher(user))
        .ok_or(ServiceError::NotFound)
}

fn notify_rider<R>(repo: &R, ride: &Ride)
where
    R: NotificationWriter + ?Sized,
{
    let notification = NewNotification::new(
        ride.user_id,
        format!("Ride #{}", ride.id),
        ride.status.message(),
    );
    if let Err(err) = repo.create_notification(&notification) {
        log::error!("Failed to notify rider about ride {}: {err}", ride.id);
    }
}

pub fn request_ride<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RequestRideForm,
) -> ServiceResult<RideView>
where
    R: RideWriter + ?Sized,
{
    let new_ride = form.into_new_ride(user.id)?;
    let ride = repo.create_ride(&new_ride).map_err(|err| {
        log::error!("Failed to create ride: {err}");
        err
    })?;
    log::info!(
        "Ride {} requested by user {} ({})",
        ride.id,
        user.id,
        ride.vehicle_type
    );
    Ok(ride.into())
}

pub fn get_ride<R>(repo: &R, user: &AuthenticatedUser, ride_id: i32) -> ServiceResult<RideView>
where
    R: RideReader + ?Sized,
{
    load_visible_ride(repo, user, ride_id).map(RideView::from)
}

pub fn list_rides<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<RideView>>
where
    R: RideReader + ?Sized,
{
    Ok(repo
        .list_user_rides(user.id)?
        .into_iter()
        .map(RideView::from)
        .collect())
}

/// Moves a ride to its next status. Only drivers and admins may dispatch.
pub fn advance_ride<R>(
    repo: &R,
    user: &AuthenticatedUser,
    ride_id: i32,
    form: AdvanceRideForm,
) -> ServiceResult<RideView>
where
    R: RideReader + RideWriter + NotificationWriter + RewardWriter + ?Sized,
{
    if !is_dispatcher(user) {
        return Err(ServiceError::Forbidden);
    }

    let ride = load_visible_ride(repo, user, ride_id)?;
    let requested = form.target()?;
    let next = ride.status.next().ok_or_else(|| {
        ServiceError::Conflict(format!("Ride is already {}", ride.status))
    })?;
    if let Some(requested) = requested.filter(|requested| *requested != next) {
        return Err(ServiceError::Conflict(format!(
            "Cannot move ride from {} to {requested}",
            ride.status
        )));
    }

    let driver_name = match next {
        RideStatus::DriverAssigned => Some(
            form.driver_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| user.email.clone()),
        ),
        _ => None,
    };

    let updated = repo.update_ride_status(
        ride.id,
        &RideStatusChange {
            from: ride.status,
            status: next,
            driver_name,
        },
    )?;
    notify_rider(repo, &updated);

    if updated.status == RideStatus::Completed {
        award_ride_points(repo, &updated);
    }

    Ok(updated.into())
}

fn award_ride_points<R>(repo: &R, ride: &Ride)
where
    R: RewardWriter + ?Sized,
{
    let Ok(fare) = Amount::from_cents(ride.fare_cents) else {
        return;
    };
    let points = points_for_spend(fare);
    if points <= 0 {
        return;
    }
    let event = NewRewardEvent {
        user_id: ride.user_id,
        points,
        reason: format!("Ride #{}", ride.id),
    };
    if let Err(err) = repo.create_reward_event(&event) {
        log::error!("Failed to award points for ride {}: {err}", ride.id);
    }
}

/// Cancels a ride before pickup. Riders cancel their own rides; dispatchers
/// may cancel any.
pub fn cancel_ride<R>(repo: &R, user: &AuthenticatedUser, ride_id: i32) -> ServiceResult<RideView>
where
    R: RideReader + RideWriter + NotificationWriter + ?Sized,
{
    let ride = load_visible_ride(repo, user, ride_id)?;
    if !ride.status.can_cancel() {
        return Err(ServiceError::Conflict(format!(
            "A ride in status {} cannot be cancelled",
            ride.status
        )));
    }

    let updated = repo.update_ride_status(
        ride.id,
        &RideStatusChange {
            from: ride.status,
            status: RideStatus::Cancelled,
            driver_name: None,
        },
    )?;
    notify_rider(repo, &updated);
    Ok(updated.into())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::always;

    use super::*;
    use crate::domain::notification::Notification;
    use crate::domain::rewards::RewardEvent;
    use crate::domain::ride::VehicleType;
    use crate::domain::types::{Address, NotificationId, UserId};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn rider() -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(4).unwrap(),
            email: "rider@example.com".to_string(),
            roles: vec!["customer".to_string()],
        }
    }

    fn driver() -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(40).unwrap(),
            email: "driver@example.com".to_string(),
            roles: vec!["driver".to_string()],
        }
    }

    fn ride(status: RideStatus) -> Ride {
        let now = Utc::now().naive_utc();
        Ride {
            id: RideId::new(12).unwrap(),
            user_id: UserId::new(4).unwrap(),
            pickup_address: Address::new("Main St 1").unwrap(),
            dropoff_address: Address::new("Airport").unwrap(),
            vehicle_type: VehicleType::Comfort,
            fare_cents: 1_850,
            driver_name: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn expect_notifications(repo: &mut MockRepository) {
        repo.expect_create_notification().returning(|n| {
            Ok(Notification {
                id: NotificationId::new(1).unwrap(),
                user_id: n.user_id,
                title: n.title.clone(),
                body: n.body.clone(),
                is_read: false,
                created_at: Utc::now().naive_utc(),
            })
        });
    }

    fn apply_change(repo: &mut MockRepository) {
        repo.expect_update_ride_status()
            .returning(|_, change| {
                Ok(Ride {
                    driver_name: change.driver_name.clone(),
                    ..ride(change.status)
                })
            });
    }

    #[test]
    fn view_carries_status_message() {
        let view = RideView::from(ride(RideStatus::DriverArriving));
        assert_eq!(
            view.status_message,
            "Your driver is on the way to your pickup point."
        );
        assert!(view.can_cancel);
    }

    #[test]
    fn riders_cannot_dispatch() {
        let repo = MockRepository::new();
        let result = advance_ride(&repo, &rider(), 12, AdvanceRideForm::default());
        assert_eq!(result, Err(ServiceError::Forbidden));
    }

    #[test]
    fn assigning_a_driver_records_their_name() {
        let mut repo = MockRepository::new();
        repo.expect_get_ride_by_id()
            .returning(|_| Ok(Some(ride(RideStatus::Requesting))));
        repo.expect_update_ride_status()
            .withf(|_, change| {
                change.status == RideStatus::DriverAssigned
                    && change.driver_name.as_deref() == Some("Omar")
            })
            .returning(|_, change| {
                Ok(Ride {
                    driver_name: change.driver_name.clone(),
                    ..ride(change.status)
                })
            });
        expect_notifications(&mut repo);

        let form = AdvanceRideForm {
            status: None,
            driver_name: Some(" Omar ".to_string()),
        };
        let view = advance_ride(&repo, &driver(), 12, form).unwrap();

        assert_eq!(view.ride.status, RideStatus::DriverAssigned);
        assert_eq!(view.ride.driver_name.as_deref(), Some("Omar"));
    }

    #[test]
    fn skipping_a_status_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_ride_by_id()
            .returning(|_| Ok(Some(ride(RideStatus::Requesting))));
        repo.expect_update_ride_status().never();

        let form = AdvanceRideForm {
            status: Some("in_transit".to_string()),
            driver_name: None,
        };
        let result = advance_ride(&repo, &driver(), 12, form);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn finished_rides_cannot_advance() {
        let mut repo = MockRepository::new();
        repo.expect_get_ride_by_id()
            .returning(|_| Ok(Some(ride(RideStatus::Completed))));

        let result = advance_ride(&repo, &driver(), 12, AdvanceRideForm::default());

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn completion_awards_points_for_the_fare() {
        let mut repo = MockRepository::new();
        repo.expect_get_ride_by_id()
            .returning(|_| Ok(Some(ride(RideStatus::InTransit))));
        apply_change(&mut repo);
        expect_notifications(&mut repo);
        repo.expect_create_reward_event()
            .times(1)
            .withf(|event| event.points == 18 && event.reason == "Ride #12")
            .returning(|event| {
                Ok(RewardEvent {
                    id: 1,
                    user_id: event.user_id,
                    points: event.points,
                    reason: event.reason.clone(),
                    created_at: Utc::now().naive_utc(),
                })
            });

        let view = advance_ride(&repo, &driver(), 12, AdvanceRideForm::default()).unwrap();

        assert_eq!(view.ride.status, RideStatus::Completed);
    }

    #[test]
    fn losing_a_concurrent_advance_awards_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_get_ride_by_id()
            .returning(|_| Ok(Some(ride(RideStatus::InTransit))));
        repo.expect_update_ride_status()
            .withf(|_, change| {
                change.from == RideStatus::InTransit && change.status == RideStatus::Completed
            })
            .returning(|_, _| {
                Err(RepositoryError::StaleState(
                    "Ride 12 is no longer in_transit".to_string(),
                ))
            });
        repo.expect_create_notification().never();
        repo.expect_create_reward_event().never();

        let result = advance_ride(&repo, &driver(), 12, AdvanceRideForm::default());

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn rider_cannot_cancel_after_pickup() {
        let mut repo = MockRepository::new();
        repo.expect_get_ride_by_id()
            .returning(|_| Ok(Some(ride(RideStatus::Pickup))));

        let result = cancel_ride(&repo, &rider(), 12);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn rider_cancels_while_driver_is_on_the_way() {
        let mut repo = MockRepository::new();
        repo.expect_get_ride_by_id()
            .returning(|_| Ok(Some(ride(RideStatus::DriverArriving))));
        repo.expect_update_ride_status()
            .with(always(), always())
            .returning(|_, change| Ok(ride(change.status)));
        expect_notifications(&mut repo);

        let view = cancel_ride(&repo, &rider(), 12).unwrap();

        assert_eq!(view.ride.status, RideStatus::Cancelled);
        assert_eq!(view.status_message, "This ride was cancelled.");
    }

    #[test]
    fn strangers_cannot_see_a_ride() {
        let mut repo = MockRepository::new();
        repo.expect_get_ride_by_id()
            .returning(|_| Ok(Some(ride(RideStatus::Requesting))));
        let stranger = AuthenticatedUser {
            id: UserId::new(99).unwrap(),
            ..rider()
        };

        assert_eq!(get_ride(&repo, &stranger, 12), Err(ServiceError::NotFound));
    }
}
