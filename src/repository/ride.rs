//! Repository implementation for taxi rides.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::ride::{NewRide, Ride, RideStatusChange};
use crate::domain::types::{RideId, UserId};
use crate::models::ride::{NewRide as DbNewRide, Ride as DbRide};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, RideReader, RideWriter};

impl RideReader for DieselRepository {
    fn get_ride_by_id(&self, id: RideId) -> RepositoryResult<Option<Ride>> {
        use crate::schema::ride_bookings;

        let mut conn = self.conn()?;
        let ride = ride_bookings::table
            .find(id.get())
            .first::<DbRide>(&mut conn)
            .optional()?;

        ride.map(Ride::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_user_rides(&self, user_id: UserId) -> RepositoryResult<Vec<Ride>> {
        use crate::schema::ride_bookings;

        let mut conn = self.conn()?;
        ride_bookings::table
            .filter(ride_bookings::user_id.eq(user_id.get()))
            .order((ride_bookings::created_at.desc(), ride_bookings::id.desc()))
            .load::<DbRide>(&mut conn)?
            .into_iter()
            .map(|r| Ride::try_from(r).map_err(RepositoryError::from))
            .collect()
    }
}

impl RideWriter for DieselRepository {
    fn create_ride(&self, new_ride: &NewRide) -> RepositoryResult<Ride> {
        use crate::schema::ride_bookings;

        let mut conn = self.conn()?;
        let db_new: DbNewRide = new_ride.into();
        let ride = diesel::insert_into(ride_bookings::table)
            .values(&db_new)
            .get_result::<DbRide>(&mut conn)?;

        Ride::try_from(ride).map_err(RepositoryError::from)
    }

    fn update_ride_status(&self, id: RideId, change: &RideStatusChange) -> RepositoryResult<Ride> {
        use crate::schema::ride_bookings;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        // Concurrent transitions race on the status column; only one wins.
        let target = ride_bookings::table
            .find(id.get())
            .filter(ride_bookings::status.eq(change.from.as_str()));
        let ride = match change.driver_name.as_deref() {
            Some(driver) => diesel::update(target)
                .set((
                    ride_bookings::status.eq(change.status.as_str()),
                    ride_bookings::driver_name.eq(driver),
                    ride_bookings::updated_at.eq(now),
                ))
                .get_result::<DbRide>(&mut conn)
                .optional()?,
            None => diesel::update(target)
                .set((
                    ride_bookings::status.eq(change.status.as_str()),
                    ride_bookings::updated_at.eq(now),
                ))
                .get_result::<DbRide>(&mut conn)
                .optional()?,
        };
        let ride = ride.ok_or_else(|| {
            RepositoryError::StaleState(format!("Ride {id} is no longer {}", change.from))
        })?;

        Ride::try_from(ride).map_err(RepositoryError::from)
    }
}
