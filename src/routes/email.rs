use actix_web::{HttpResponse, post, web};
use tera::Tera;

use crate::dto::email::SendEmailResponse;
use crate::mailer::EmailProvider;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::services::ServiceError;
use crate::services::email as email_service;
use crate::services::rate_limit::RateLimiter;

/// Renders a transactional email template and hands it to the email provider.
///
/// The body is read raw so the rate limiter sees every authenticated request,
/// including ones whose payload fails validation.
#[post("/send-email")]
pub async fn send_email(
    user: AuthenticatedUser,
    body: web::Bytes,
    limiter: web::Data<RateLimiter>,
    tera: web::Data<Tera>,
    provider: web::Data<dyn EmailProvider>,
    server_config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServiceError> {
    let email_id = email_service::send_email(
        &user,
        &limiter,
        &tera,
        provider.get_ref(),
        &server_config.email_from,
        &body,
    )
    .await?;

    log::info!("User {} sent email {email_id}", user.id);
    Ok(HttpResponse::Ok().json(SendEmailResponse {
        success: true,
        email_id,
    }))
}
