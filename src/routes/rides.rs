use actix_web::{HttpResponse, get, post, web};

use crate::forms::rides::{AdvanceRideForm, RequestRideForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::rides as ride_service;

#[get("/rides")]
pub async fn list_rides(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let rides = ride_service::list_rides(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(rides))
}

#[post("/rides")]
pub async fn request_ride(
    user: AuthenticatedUser,
    form: web::Json<RequestRideForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let ride = ride_service::request_ride(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Created().json(ride))
}

#[get("/rides/{ride_id}")]
pub async fn show_ride(
    ride_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let ride = ride_service::get_ride(repo.get_ref(), &user, ride_id.into_inner())?;
    Ok(HttpResponse::Ok().json(ride))
}

/// Moves the ride one step forward. The body is optional.
#[post("/rides/{ride_id}/advance")]
pub async fn advance_ride(
    ride_id: web::Path<i32>,
    user: AuthenticatedUser,
    form: Option<web::Json<AdvanceRideForm>>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let form = form.map(web::Json::into_inner).unwrap_or_default();
    let ride = ride_service::advance_ride(repo.get_ref(), &user, ride_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(ride))
}

#[post("/rides/{ride_id}/cancel")]
pub async fn cancel_ride(
    ride_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let ride = ride_service::cancel_ride(repo.get_ref(), &user, ride_id.into_inner())?;
    Ok(HttpResponse::Ok().json(ride))
}
