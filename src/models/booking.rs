//! Diesel models for service bookings.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::booking::{Booking as DomainBooking, NewBooking as DomainNewBooking};
use crate::domain::types::{BookingId, ProviderId, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::service_bookings)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub provider_id: i32,
    pub scheduled_at: NaiveDateTime,
    pub status: String,
    pub notes: Option<String>,
    pub amount_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::service_bookings)]
pub struct NewBooking<'a> {
    pub user_id: i32,
    pub provider_id: i32,
    pub scheduled_at: NaiveDateTime,
    pub notes: Option<&'a str>,
    pub amount_cents: i64,
}

impl TryFrom<Booking> for DomainBooking {
    type Error = TypeConstraintError;

    fn try_from(booking: Booking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BookingId::try_from(booking.id)?,
            user_id: UserId::try_from(booking.user_id)?,
            provider_id: ProviderId::try_from(booking.provider_id)?,
            scheduled_at: booking.scheduled_at,
            status: booking.status.parse()?,
            notes: booking.notes,
            amount_cents: booking.amount_cents,
            created_at: booking.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewBooking> for NewBooking<'a> {
    fn from(booking: &'a DomainNewBooking) -> Self {
        Self {
            user_id: booking.user_id.get(),
            provider_id: booking.provider_id.get(),
            scheduled_at: booking.scheduled_at,
            notes: booking.notes.as_deref(),
            amount_cents: booking.amount_cents,
        }
    }
}
