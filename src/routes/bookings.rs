use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;

use crate::forms::bookings::CreateBookingForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::bookings as booking_service;

#[get("/bookings")]
pub async fn list_bookings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let bookings = booking_service::list_bookings(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(bookings))
}

#[post("/bookings")]
pub async fn create_booking(
    user: AuthenticatedUser,
    form: web::Json<CreateBookingForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let booking = booking_service::create_booking(
        repo.get_ref(),
        &user,
        form.into_inner(),
        Utc::now().naive_utc(),
    )?;
    log::info!("User {} booked provider {}", user.id, booking.provider_id);
    Ok(HttpResponse::Created().json(booking))
}

#[post("/bookings/{booking_id}/cancel")]
pub async fn cancel_booking(
    booking_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let booking = booking_service::cancel_booking(repo.get_ref(), &user, booking_id.into_inner())?;
    Ok(HttpResponse::Ok().json(booking))
}
