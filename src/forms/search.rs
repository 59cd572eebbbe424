use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RecordSearchForm {
    #[validate(length(min = 1, max = 200, message = "Search query is required"))]
    pub query: String,
}
