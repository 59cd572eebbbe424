//! HTTP handlers.
//!
//! Handlers extract the caller, delegate to [`crate::services`] and map
//! [`ServiceError`] onto JSON error responses.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::http::header::RETRY_AFTER;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde_json::json;

use crate::services::ServiceError;

pub mod admin;
pub mod bookings;
pub mod catalog;
pub mod donations;
pub mod email;
pub mod notifications;
pub mod rewards;
pub mod rides;
pub mod search;
pub mod wallet;

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) | ServiceError::InsufficientFunds { .. } => {
                StatusCode::CONFLICT
            }
            ServiceError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ServiceError::Upstream(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            ServiceError::Internal(detail) => {
                log::error!("Request failed: {detail}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let mut response = HttpResponse::build(status);
        if let ServiceError::RateLimited { retry_after_secs } = self {
            response.insert_header((RETRY_AFTER, retry_after_secs.to_string()));
        }
        response.json(json!({ "error": message }))
    }
}

fn bad_request<E>(err: E, context: &str) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    log::warn!("Rejected {context}: {err}");
    let body = json!({ "error": format!("Invalid {context}: {err}") });
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err, "request body")
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err, "query string")
}

/// Registers extractor configuration and every route of the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(web::scope("/functions/v1").service(email::send_email))
        .service(
            web::scope("/api/v1")
                .service(catalog::list_categories)
                .service(catalog::list_subcategories)
                .service(catalog::list_providers)
                .service(catalog::show_provider)
                .service(search::suggestions)
                .service(search::record_recent_search)
                .service(bookings::list_bookings)
                .service(bookings::create_booking)
                .service(bookings::cancel_booking)
                .service(rides::list_rides)
                .service(rides::request_ride)
                .service(rides::show_ride)
                .service(rides::advance_ride)
                .service(rides::cancel_ride)
                .service(wallet::show_wallet)
                .service(wallet::top_up)
                .service(wallet::pay)
                .service(wallet::pay_fuel)
                .service(rewards::show_rewards)
                .service(rewards::redeem)
                .service(donations::presets)
                .service(donations::list_donations)
                .service(donations::donate)
                .service(notifications::list_notifications)
                .service(notifications::mark_read),
        )
        .service(
            web::scope("/admin/v1")
                .service(admin::list_users)
                .service(admin::set_user_role)
                .service(admin::set_user_active)
                .service(admin::list_providers)
                .service(admin::set_provider_verified)
                .service(admin::set_provider_active)
                .service(admin::set_booking_status)
                .service(admin::analytics)
                .service(admin::backup)
                .service(admin::backup_users_csv)
                .service(admin::health)
                .service(admin::preview_email),
        );
}
