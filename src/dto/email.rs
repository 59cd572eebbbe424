use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub email_id: String,
}
