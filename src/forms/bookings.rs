use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingForm {
    pub provider_id: i32,
    /// Local wall-clock time, e.g. `2026-10-20T10:00:00`.
    pub scheduled_at: NaiveDateTime,
    #[validate(length(max = 1000, message = "Notes are too long"))]
    pub notes: Option<String>,
}
