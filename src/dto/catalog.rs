//! Catalog query parameters.

use serde::Deserialize;

/// Query string of `GET /api/v1/providers`.
#[derive(Debug, Default, Deserialize)]
pub struct ProvidersQuery {
    pub subcategory_id: Option<i32>,
    /// Free-form search over provider name and description.
    pub q: Option<String>,
    /// `rating`, `price_low`, `price_high` or `name`.
    pub sort: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionsQuery {
    #[serde(default)]
    pub q: String,
}
