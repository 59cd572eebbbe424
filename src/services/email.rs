//! Transactional email rendering and delivery.
//!
//! Requests pass through authentication (handled by the extractor), the
//! per-identity rate limiter, body validation, template rendering and finally
//! the [`EmailProvider`], in that order.

use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value, json};
use tera::{Context, Tera};

use crate::domain::types::UserRole;
use crate::forms::email::{PreviewEmailRequest, SendEmailRequest};
use crate::mailer::{EmailProvider, OutgoingEmail};
use crate::models::auth::AuthenticatedUser;
use crate::services::rate_limit::RateLimiter;
use crate::services::{ServiceError, ServiceResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailTemplate {
    Welcome,
    BookingConfirmation,
    PasswordReset,
    PaymentReceipt,
}

impl EmailTemplate {
    pub const ALL: [EmailTemplate; 4] = [
        EmailTemplate::Welcome,
        EmailTemplate::BookingConfirmation,
        EmailTemplate::PasswordReset,
        EmailTemplate::PaymentReceipt,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EmailTemplate::Welcome => "welcome",
            EmailTemplate::BookingConfirmation => "booking_confirmation",
            EmailTemplate::PasswordReset => "password_reset",
            EmailTemplate::PaymentReceipt => "payment_receipt",
        }
    }

    /// Path of the template inside the Tera instance.
    pub const fn template_name(self) -> &'static str {
        match self {
            EmailTemplate::Welcome => "email/welcome.html",
            EmailTemplate::BookingConfirmation => "email/booking_confirmation.html",
            EmailTemplate::PasswordReset => "email/password_reset.html",
            EmailTemplate::PaymentReceipt => "email/payment_receipt.html",
        }
    }

    pub const fn subject(self) -> &'static str {
        match self {
            EmailTemplate::Welcome => "Welcome to HopiGo!",
            EmailTemplate::BookingConfirmation => "Your HopiGo booking is confirmed",
            EmailTemplate::PasswordReset => "Reset your HopiGo password",
            EmailTemplate::PaymentReceipt => "Your HopiGo payment receipt",
        }
    }

    /// Placeholder values used by the admin preview.
    pub fn sample_data(self) -> Map<String, Value> {
        let value = match self {
            EmailTemplate::Welcome => json!({
                "name": "Alex",
                "action_url": "https://hopigo.app/start",
            }),
            EmailTemplate::BookingConfirmation => json!({
                "name": "Alex",
                "service": "Home cleaning",
                "provider": "Sparkle Cleaners",
                "date": "2026-10-20 10:00",
                "booking_id": "1042",
                "amount": "45.00",
            }),
            EmailTemplate::PasswordReset => json!({
                "name": "Alex",
                "reset_link": "https://hopigo.app/reset?token=sample",
                "expires_in": "1 hour",
            }),
            EmailTemplate::PaymentReceipt => json!({
                "name": "Alex",
                "amount": "25.00",
                "description": "Wallet top-up",
                "transaction_id": "7781",
                "date": "2026-10-16",
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

impl FromStr for EmailTemplate {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmailTemplate::ALL
            .into_iter()
            .find(|template| template.as_str() == s.trim())
            .ok_or_else(|| ServiceError::Validation(format!("Unknown template: {s}")))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Fields rendered inside `href` attributes.
const LINK_FIELDS: [&str; 2] = ["action_url", "reset_link"];

/// Checks that a link is an absolute `http`/`https` URL that cannot break out
/// of a double-quoted attribute, and escapes `&` for the attribute context.
fn attribute_safe_link(field: &str, raw: &str) -> ServiceResult<String> {
    let link = raw.trim();
    let lower = link.to_ascii_lowercase();
    let has_scheme = lower.starts_with("https://") || lower.starts_with("http://");
    let breaks_out = link
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '`'));
    if !has_scheme || breaks_out {
        return Err(ServiceError::Validation(format!(
            "Template field `{field}` must be an http or https URL"
        )));
    }
    Ok(link.replace('&', "&amp;"))
}

/// Turns request data into template variables.
///
/// Text is cleaned with ammonia, which drops `<script>` elements together
/// with their content. Link fields must be `http`/`https` URLs. Nested arrays
/// and objects are rejected and `null` leaves the template default in place.
pub fn template_fields(data: Map<String, Value>) -> ServiceResult<Map<String, Value>> {
    let mut fields = Map::new();
    for (key, value) in data {
        let is_link = LINK_FIELDS.contains(&key.as_str());
        let value = match value {
            Value::Null => continue,
            Value::Array(_) | Value::Object(_) => {
                return Err(ServiceError::Validation(format!(
                    "Template field `{key}` must be a string, number or boolean"
                )));
            }
            Value::String(link) if is_link => Value::String(attribute_safe_link(&key, &link)?),
            _ if is_link => {
                return Err(ServiceError::Validation(format!(
                    "Template field `{key}` must be an http or https URL"
                )));
            }
            Value::String(text) => Value::String(ammonia::clean(&text)),
            scalar => scalar,
        };
        fields.insert(key, value);
    }
    Ok(fields)
}

pub fn render_email(
    tera: &Tera,
    template: EmailTemplate,
    data: Map<String, Value>,
) -> ServiceResult<RenderedEmail> {
    let fields = template_fields(data)?;
    let context = Context::from_serialize(&fields).map_err(|e| {
        log::error!("Failed to build email context: {e}");
        ServiceError::Internal(e.to_string())
    })?;
    let html = tera
        .render(template.template_name(), &context)
        .map_err(|e| {
            log::error!("Failed to render email template {}: {e}", template.as_str());
            ServiceError::Internal(format!("Failed to render template: {e}"))
        })?;

    Ok(RenderedEmail {
        subject: template.subject().to_string(),
        html,
    })
}

/// Handles one send request on behalf of `user` and returns the provider's
/// message id.
pub async fn send_email(
    user: &AuthenticatedUser,
    limiter: &RateLimiter,
    tera: &Tera,
    provider: &dyn EmailProvider,
    from: &str,
    body: &[u8],
) -> ServiceResult<String> {
    let identity = user.identity();
    limiter.check(&identity).map_err(|limited| {
        log::warn!("Email rate limit exceeded for user {identity}");
        ServiceError::RateLimited {
            retry_after_secs: limited.retry_after.as_secs().max(1),
        }
    })?;

    let request = SendEmailRequest::from_slice(body)?;
    let template: EmailTemplate = request.template.parse()?;
    let data = request.data_object()?;
    let rendered = render_email(tera, template, data)?;

    let email = OutgoingEmail {
        from: from.to_string(),
        to: request.to.trim().to_string(),
        subject: rendered.subject,
        html: rendered.html,
    };

    provider.send(&email).await.map_err(|e| {
        log::error!("Failed to send {} email: {e}", template.as_str());
        ServiceError::Upstream(e.to_string())
    })
}

/// Renders a template with sample data for the admin dashboard without
/// sending anything.
pub fn preview_email(
    user: &AuthenticatedUser,
    tera: &Tera,
    request: PreviewEmailRequest,
) -> ServiceResult<RenderedEmail> {
    if !user.has_role(UserRole::Admin) {
        return Err(ServiceError::Forbidden);
    }

    let template: EmailTemplate = request.template.parse()?;
    let mut data = template.sample_data();
    if let Some(overrides) = request.data {
        data.extend(overrides);
    }
    render_email(tera, template, data)
}

/// Loads the bundled email templates into a standalone Tera instance.
pub fn bundled_templates() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (
            "email/base.html",
            include_str!("../../templates/email/base.html"),
        ),
        (
            "email/welcome.html",
            include_str!("../../templates/email/welcome.html"),
        ),
        (
            "email/booking_confirmation.html",
            include_str!("../../templates/email/booking_confirmation.html"),
        ),
        (
            "email/password_reset.html",
            include_str!("../../templates/email/password_reset.html"),
        ),
        (
            "email/payment_receipt.html",
            include_str!("../../templates/email/payment_receipt.html"),
        ),
    ])?;
    Ok(tera)
}
