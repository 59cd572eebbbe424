use diesel::prelude::*;

use crate::domain::booking::{Booking, BookingStatus, NewBooking};
use crate::domain::types::{BookingId, UserId};
use crate::models::booking::{Booking as DbBooking, NewBooking as DbNewBooking};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BookingReader, BookingWriter, DieselRepository};

impl BookingReader for DieselRepository {
    fn get_booking_by_id(&self, id: BookingId) -> RepositoryResult<Option<Booking>> {
        use crate::schema::service_bookings;

        let mut conn = self.conn()?;
        let booking = service_bookings::table
            .find(id.get())
            .first::<DbBooking>(&mut conn)
            .optional()?;

        booking
            .map(Booking::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_user_bookings(&self, user_id: UserId) -> RepositoryResult<Vec<Booking>> {
        use crate::schema::service_bookings;

        let mut conn = self.conn()?;
        service_bookings::table
            .filter(service_bookings::user_id.eq(user_id.get()))
            .order(service_bookings::scheduled_at.desc())
            .load::<DbBooking>(&mut conn)?
            .into_iter()
            .map(|b| Booking::try_from(b).map_err(RepositoryError::from))
            .collect()
    }
}

impl BookingWriter for DieselRepository {
    fn create_booking(&self, new_booking: &NewBooking) -> RepositoryResult<Booking> {
        use crate::schema::service_bookings;

        let mut conn = self.conn()?;
        let db_new: DbNewBooking = new_booking.into();
        let booking = diesel::insert_into(service_bookings::table)
            .values(&db_new)
            .get_result::<DbBooking>(&mut conn)?;

        Booking::try_from(booking).map_err(RepositoryError::from)
    }

    fn set_booking_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        status: BookingStatus,
    ) -> RepositoryResult<Booking> {
        use crate::schema::service_bookings;

        let mut conn = self.conn()?;
        let target = service_bookings::table
            .find(id.get())
            .filter(service_bookings::status.eq(from.as_str()));
        let booking = diesel::update(target)
            .set(service_bookings::status.eq(status.as_str()))
            .get_result::<DbBooking>(&mut conn)
            .optional()?
            .ok_or_else(|| {
                RepositoryError::StaleState(format!("Booking {id} is no longer {from}"))
            })?;

        Booking::try_from(booking).map_err(RepositoryError::from)
    }
}
