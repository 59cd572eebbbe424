use actix_web::{HttpResponse, get, post, web};

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::notifications as notification_service;

#[get("/notifications")]
pub async fn list_notifications(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let view = notification_service::list_notifications(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(view))
}

#[post("/notifications/{notification_id}/read")]
pub async fn mark_read(
    notification_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    notification_service::mark_read(repo.get_ref(), &user, notification_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
