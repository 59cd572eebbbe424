//! Admin dashboard endpoints. Role checks happen in [`crate::services::admin`].

use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::{HttpResponse, get, post, put, web};
use tera::Tera;

use crate::dto::admin::{AdminProvidersQuery, UsersQuery};
use crate::forms::admin::{SetActiveForm, SetBookingStatusForm, SetRoleForm, SetVerifiedForm};
use crate::forms::email::PreviewEmailRequest;
use crate::mailer::EmailProvider;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::admin as admin_service;
use crate::services::email as email_service;
use crate::services::rate_limit::RateLimiter;

#[get("/users")]
pub async fn list_users(
    params: web::Query<UsersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = admin_service::list_users(repo.get_ref(), &user, params.into_inner())?;
    Ok(HttpResponse::Ok().json(page))
}

#[put("/users/{user_id}/role")]
pub async fn set_user_role(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    form: web::Json<SetRoleForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let updated =
        admin_service::set_user_role(repo.get_ref(), &user, user_id.into_inner(), form.into_inner())?;
    Ok(HttpResponse::Ok().json(updated))
}

#[put("/users/{user_id}/active")]
pub async fn set_user_active(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    form: web::Json<SetActiveForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let updated = admin_service::set_user_active(
        repo.get_ref(),
        &user,
        user_id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(updated))
}

#[get("/providers")]
pub async fn list_providers(
    params: web::Query<AdminProvidersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = admin_service::list_providers(repo.get_ref(), &user, params.into_inner())?;
    Ok(HttpResponse::Ok().json(page))
}

#[put("/providers/{provider_id}/verified")]
pub async fn set_provider_verified(
    provider_id: web::Path<i32>,
    user: AuthenticatedUser,
    form: web::Json<SetVerifiedForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let provider = admin_service::set_provider_verified(
        repo.get_ref(),
        &user,
        provider_id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(provider))
}

#[put("/providers/{provider_id}/active")]
pub async fn set_provider_active(
    provider_id: web::Path<i32>,
    user: AuthenticatedUser,
    form: web::Json<SetActiveForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let provider = admin_service::set_provider_active(
        repo.get_ref(),
        &user,
        provider_id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(provider))
}

#[put("/bookings/{booking_id}/status")]
pub async fn set_booking_status(
    booking_id: web::Path<i32>,
    user: AuthenticatedUser,
    form: web::Json<SetBookingStatusForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let booking = admin_service::set_booking_status(
        repo.get_ref(),
        &user,
        booking_id.into_inner(),
        form.into_inner(),
    )?;
    Ok(HttpResponse::Ok().json(booking))
}

#[get("/analytics")]
pub async fn analytics(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let snapshot = admin_service::analytics(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[get("/backup")]
pub async fn backup(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let snapshot = admin_service::backup(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok()
        .insert_header((
            CONTENT_DISPOSITION,
            "attachment; filename=\"hopigo-backup.json\"",
        ))
        .json(snapshot))
}

#[get("/backup/users.csv")]
pub async fn backup_users_csv(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let csv = admin_service::export_users_csv(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/csv; charset=utf-8"))
        .insert_header((CONTENT_DISPOSITION, "attachment; filename=\"users.csv\""))
        .body(csv))
}

#[get("/health")]
pub async fn health(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    limiter: web::Data<RateLimiter>,
    provider: web::Data<dyn EmailProvider>,
) -> Result<HttpResponse, ServiceError> {
    let report =
        admin_service::health(repo.get_ref(), &user, &limiter, provider.is_configured())?;
    Ok(HttpResponse::Ok().json(report))
}

#[post("/email/preview")]
pub async fn preview_email(
    user: AuthenticatedUser,
    request: web::Json<PreviewEmailRequest>,
    tera: web::Data<Tera>,
) -> Result<HttpResponse, ServiceError> {
    let rendered = email_service::preview_email(&user, &tera, request.into_inner())?;
    Ok(HttpResponse::Ok().json(rendered))
}
