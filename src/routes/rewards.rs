use actix_web::{HttpResponse, get, post, web};

use crate::forms::rewards::RedeemPointsForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::rewards as reward_service;

#[get("/rewards")]
pub async fn show_rewards(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let summary = reward_service::rewards_summary(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(summary))
}

#[post("/rewards/redeem")]
pub async fn redeem(
    user: AuthenticatedUser,
    form: web::Json<RedeemPointsForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let credit = reward_service::redeem_points(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Created().json(credit))
}
