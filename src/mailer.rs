//! Outbound email delivery through a Resend-compatible HTTP API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fully rendered message ready to hand to a provider.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("email provider is not configured")]
    NotConfigured,

    #[error("email provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("email provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("email provider returned an unexpected response")]
    UnexpectedResponse,
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Sends `email` and returns the provider's message id.
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailerError>;

    fn is_configured(&self) -> bool {
        true
    }
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

pub struct ResendProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ResendProvider {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmailProvider for ResendProvider {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailerError> {
        if !self.is_configured() {
            return Err(MailerError::NotConfigured);
        }

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: SendResponse = response
            .json()
            .await
            .map_err(|_| MailerError::UnexpectedResponse)?;
        Ok(body.id)
    }

    fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.api_url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let provider = ResendProvider::new("https://api.resend.com/", "key");
        assert_eq!(provider.endpoint(), "https://api.resend.com/emails");
    }

    #[actix_web::test]
    async fn missing_key_is_not_configured() {
        let provider = ResendProvider::new("https://api.resend.com", "  ");
        let email = OutgoingEmail {
            from: "HopiGo <no-reply@hopigo.app>".to_string(),
            to: "rider@example.com".to_string(),
            subject: "Hi".to_string(),
            html: "<p>Hi</p>".to_string(),
        };

        assert!(!provider.is_configured());
        assert!(matches!(
            provider.send(&email).await,
            Err(MailerError::NotConfigured)
        ));
    }
}
