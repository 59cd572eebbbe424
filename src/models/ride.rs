//! Diesel models for taxi rides.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::ride::{NewRide as DomainNewRide, Ride as DomainRide};
use crate::domain::types::{Address, RideId, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::ride_bookings)]
/// Diesel model for [`crate::domain::ride::Ride`].
pub struct Ride {
    pub id: i32,
    pub user_id: i32,
    pub pickup_address: String,
    pub dropoff_address: String,
    pub vehicle_type: String,
    pub fare_cents: i64,
    pub driver_name: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ride_bookings)]
pub struct NewRide<'a> {
    pub user_id: i32,
    pub pickup_address: &'a str,
    pub dropoff_address: &'a str,
    pub vehicle_type: &'a str,
    pub fare_cents: i64,
}

impl TryFrom<Ride> for DomainRide {
    type Error = TypeConstraintError;

    fn try_from(ride: Ride) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RideId::try_from(ride.id)?,
            user_id: UserId::try_from(ride.user_id)?,
            pickup_address: Address::new(ride.pickup_address)?,
            dropoff_address: Address::new(ride.dropoff_address)?,
            vehicle_type: ride.vehicle_type.parse()?,
            fare_cents: ride.fare_cents,
            driver_name: ride.driver_name,
            status: ride.status.parse()?,
            created_at: ride.created_at,
            updated_at: ride.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewRide> for NewRide<'a> {
    fn from(ride: &'a DomainNewRide) -> Self {
        Self {
            user_id: ride.user_id.get(),
            pickup_address: ride.pickup_address.as_str(),
            dropoff_address: ride.dropoff_address.as_str(),
            vehicle_type: ride.vehicle_type.as_str(),
            fare_cents: ride.fare_cents,
        }
    }
}
