use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

use crate::forms::FormError;

/// Body of `POST /functions/v1/send-email`.
///
/// Every field defaults so that a missing one surfaces as a validation message
/// rather than a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct SendEmailRequest {
    #[serde(default)]
    #[validate(email(message = "A valid recipient email address is required"))]
    pub to: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Template is required"))]
    pub template: String,
    #[serde(default)]
    pub data: Value,
}

impl SendEmailRequest {
    /// Parses and validates a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, FormError> {
        let request: SendEmailRequest = serde_json::from_slice(body)
            .map_err(|e| FormError::InvalidPayload(format!("Invalid request body: {e}")))?;
        request.validate()?;
        Ok(request)
    }

    /// Template variables; `null` counts as an empty object.
    pub fn data_object(&self) -> Result<Map<String, Value>, FormError> {
        match &self.data {
            Value::Null => Ok(Map::new()),
            Value::Object(map) => Ok(map.clone()),
            _ => Err(FormError::InvalidPayload(
                "Template data must be an object".to_string(),
            )),
        }
    }
}

/// Body of `POST /admin/v1/email/preview`.
#[derive(Debug, Deserialize)]
pub struct PreviewEmailRequest {
    pub template: String,
    /// Overrides merged over the template's sample data.
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_recipient_fails_validation() {
        let err = SendEmailRequest::from_slice(br#"{"template":"welcome"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "A valid recipient email address is required"
        );
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = SendEmailRequest::from_slice(b"{not json").unwrap_err();
        assert!(matches!(err, FormError::InvalidPayload(_)));
    }

    #[test]
    fn data_defaults_to_empty_object() {
        let request =
            SendEmailRequest::from_slice(br#"{"to":"a@example.com","template":"welcome"}"#)
                .unwrap();
        assert!(request.data_object().unwrap().is_empty());
    }

    #[test]
    fn non_object_data_is_rejected() {
        let request = SendEmailRequest::from_slice(
            br#"{"to":"a@example.com","template":"welcome","data":[1,2]}"#,
        )
        .unwrap();
        assert!(request.data_object().is_err());
    }
}
