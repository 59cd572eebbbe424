//! Admin dashboard operations. Every entry point requires the `admin` role.

use std::time::Instant;

use serde::Serialize;

use crate::domain::admin::{AnalyticsSnapshot, BackupSnapshot};
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::notification::NewNotification;
use crate::domain::provider::Provider;
use crate::domain::rewards::{NewRewardEvent, points_for_spend};
use crate::domain::types::{Amount, BookingId, ProviderId, UserId, UserRole};
use crate::domain::user::User;
use crate::dto::admin::{AdminProvidersQuery, DatabaseHealth, HealthReport, UsersQuery};
use crate::forms::admin::{SetActiveForm, SetBookingStatusForm, SetRoleForm, SetVerifiedForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{
    AdminReader, BookingReader, BookingWriter, NotificationWriter, ProviderListQuery,
    ProviderReader, ProviderWriter, RewardWriter, UserListQuery, UserReader, UserWriter,
};
use crate::services::rate_limit::RateLimiter;
use crate::services::{DEFAULT_ITEMS_PER_PAGE, ServiceError, ServiceResult};

fn require_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    if user.has_role(UserRole::Admin) {
        Ok(())
    } else {
        log::warn!("User {} attempted an admin operation", user.id);
        Err(ServiceError::Forbidden)
    }
}

pub fn list_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: UsersQuery,
) -> ServiceResult<Paginated<User>>
where
    R: UserReader + ?Sized,
{
    require_admin(user)?;

    let page = query.page.unwrap_or(1).max(1);
    let mut list_query = UserListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = query.q.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        list_query = list_query.search(term);
    }
    if let Some(role) = query.role.as_deref().filter(|r| !r.is_empty()) {
        list_query = list_query.role(role.parse()?);
    }

    let (total, users) = repo.list_users(list_query).map_err(|err| {
        log::error!("Failed to list users: {err}");
        err
    })?;
    Ok(Paginated::new(users, page, DEFAULT_ITEMS_PER_PAGE, total))
}

pub fn set_user_role<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
    form: SetRoleForm,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    require_admin(user)?;
    let user_id = UserId::new(user_id)?;
    let role: UserRole = form.role.parse()?;

    if user_id == user.id && role != UserRole::Admin {
        return Err(ServiceError::Conflict(
            "Admins cannot remove their own admin role".to_string(),
        ));
    }

    let updated = repo.set_user_role(user_id, role)?;
    log::info!("User {} set role of user {} to {role}", user.id, user_id);
    Ok(updated)
}

pub fn set_user_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    user_id: i32,
    form: SetActiveForm,
) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    require_admin(user)?;
    let user_id = UserId::new(user_id)?;

    if user_id == user.id && !form.is_active {
        return Err(ServiceError::Conflict(
            "Admins cannot deactivate themselves".to_string(),
        ));
    }

    repo.set_user_active(user_id, form.is_active)
        .map_err(ServiceError::from)
}

/// Every provider, including inactive ones.
pub fn list_providers<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: AdminProvidersQuery,
) -> ServiceResult<Paginated<Provider>>
where
    R: ProviderReader + ?Sized,
{
    require_admin(user)?;

    let page = query.page.unwrap_or(1).max(1);
    let mut list_query = ProviderListQuery::new()
        .include_inactive()
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = query.q.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        list_query = list_query.search(term);
    }

    let (total, providers) = repo.list_providers(list_query)?;
    Ok(Paginated::new(providers, page, DEFAULT_ITEMS_PER_PAGE, total))
}

pub fn set_provider_verified<R>(
    repo: &R,
    user: &AuthenticatedUser,
    provider_id: i32,
    form: SetVerifiedForm,
) -> ServiceResult<Provider>
where
    R: ProviderWriter + ?Sized,
{
    require_admin(user)?;
    let provider_id = ProviderId::new(provider_id)?;
    repo.set_provider_verified(provider_id, form.is_verified)
        .map_err(ServiceError::from)
}

pub fn set_provider_active<R>(
    repo: &R,
    user: &AuthenticatedUser,
    provider_id: i32,
    form: SetActiveForm,
) -> ServiceResult<Provider>
where
    R: ProviderWriter + ?Sized,
{
    require_admin(user)?;
    let provider_id = ProviderId::new(provider_id)?;
    repo.set_provider_active(provider_id, form.is_active)
        .map_err(ServiceError::from)
}

/// Moves a booking through its lifecycle on behalf of the provider.
///
/// Completed and cancelled bookings are final. Completion credits the
/// customer one reward point per whole unit of the booking amount.
pub fn set_booking_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    booking_id: i32,
    form: SetBookingStatusForm,
) -> ServiceResult<Booking>
where
    R: BookingReader + BookingWriter + NotificationWriter + RewardWriter + ?Sized,
{
    require_admin(user)?;
    let booking_id = BookingId::new(booking_id)?;
    let status: BookingStatus = form.status.parse()?;

    let booking = repo
        .get_booking_by_id(booking_id)?
        .ok_or(ServiceError::NotFound)?;
    if matches!(
        booking.status,
        BookingStatus::Completed | BookingStatus::Cancelled
    ) {
        return Err(ServiceError::Conflict(format!(
            "Booking is already {}",
            booking.status
        )));
    }

    let updated = repo.set_booking_status(booking_id, booking.status, status)?;

    let notification = NewNotification::new(
        updated.user_id,
        format!("Booking #{}", updated.id),
        format!("Your booking is now {}.", updated.status),
    );
    if let Err(err) = repo.create_notification(&notification) {
        log::error!("Failed to notify about booking {}: {err}", updated.id);
    }

    if updated.status == BookingStatus::Completed {
        award_booking_points(repo, &updated);
    }

    Ok(updated)
}

fn award_booking_points<R>(repo: &R, booking: &Booking)
where
    R: RewardWriter + ?Sized,
{
    let points = Amount::from_cents(booking.amount_cents)
        .map(points_for_spend)
        .unwrap_or(0);
    if points <= 0 {
        return;
    }
    let event = NewRewardEvent {
        user_id: booking.user_id,
        points,
        reason: format!("Booking #{}", booking.id),
    };
    if let Err(err) = repo.create_reward_event(&event) {
        log::error!("Failed to award points for booking {}: {err}", booking.id);
    }
}

pub fn analytics<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<AnalyticsSnapshot>
where
    R: AdminReader + ?Sized,
{
    require_admin(user)?;
    repo.analytics().map_err(|err| {
        log::error!("Failed to compute analytics: {err}");
        ServiceError::from(err)
    })
}

pub fn backup<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<BackupSnapshot>
where
    R: AdminReader + ?Sized,
{
    require_admin(user)?;
    let snapshot = repo.backup().map_err(|err| {
        log::error!("Failed to export backup: {err}");
        ServiceError::from(err)
    })?;
    log::info!(
        "User {} exported a backup: {:?}",
        user.id,
        snapshot.row_counts()
    );
    Ok(snapshot)
}

#[derive(Serialize)]
struct UserCsvRow<'a> {
    id: i32,
    email: &'a str,
    full_name: &'a str,
    phone: &'a str,
    role: &'static str,
    is_active: bool,
    created_at: String,
}

pub fn users_to_csv(users: &[User]) -> ServiceResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for user in users {
        writer
            .serialize(UserCsvRow {
                id: user.id.get(),
                email: user.email.as_str(),
                full_name: user.full_name.as_str(),
                phone: user.phone.as_ref().map(|p| p.as_str()).unwrap_or(""),
                role: user.role.as_str(),
                is_active: user.is_active,
                created_at: user.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            })
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ServiceError::Internal(e.to_string()))
}

/// CSV export of every user account.
pub fn export_users_csv<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<String>
where
    R: UserReader + ?Sized,
{
    require_admin(user)?;
    let (_, users) = repo.list_users(UserListQuery::new())?;
    users_to_csv(&users)
}

pub fn health<R>(
    repo: &R,
    user: &AuthenticatedUser,
    limiter: &RateLimiter,
    email_configured: bool,
) -> ServiceResult<HealthReport>
where
    R: AdminReader + ?Sized,
{
    require_admin(user)?;

    let started = Instant::now();
    let ping = repo.ping();
    let database = DatabaseHealth {
        ok: ping.is_ok(),
        latency_ms: started.elapsed().as_millis(),
        error: ping.err().map(|e| e.to_string()),
    };

    limiter.prune(Instant::now());
    let status = if database.ok && email_configured {
        "ok"
    } else {
        "degraded"
    };

    Ok(HealthReport {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
        rate_limited_identities: limiter.tracked_identities(),
        email_configured,
    })
}
