use actix_web::{HttpResponse, get, post, web};
use serde_json::json;

use crate::forms::donations::DonationForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::donations as donation_service;

#[get("/donations/presets")]
pub async fn presets() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "amounts": donation_service::preset_amounts() }))
}

#[get("/donations")]
pub async fn list_donations(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let donations = donation_service::list_donations(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(donations))
}

#[post("/donations")]
pub async fn donate(
    user: AuthenticatedUser,
    form: web::Json<DonationForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let donation = donation_service::donate(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Created().json(donation))
}
