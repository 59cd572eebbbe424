use actix_web::{HttpResponse, get, post, web};

use crate::forms::wallet::{FuelPaymentForm, PaymentForm, TopUpForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::wallet as wallet_service;

#[get("/wallet")]
pub async fn show_wallet(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let summary = wallet_service::wallet_summary(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(summary))
}

#[post("/wallet/top-up")]
pub async fn top_up(
    user: AuthenticatedUser,
    form: web::Json<TopUpForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let tx = wallet_service::top_up(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Created().json(tx))
}

#[post("/wallet/pay")]
pub async fn pay(
    user: AuthenticatedUser,
    form: web::Json<PaymentForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let tx = wallet_service::pay(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Created().json(tx))
}

#[post("/wallet/fuel")]
pub async fn pay_fuel(
    user: AuthenticatedUser,
    form: web::Json<FuelPaymentForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let tx = wallet_service::pay_fuel(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Created().json(tx))
}
