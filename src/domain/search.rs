use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;

/// Query previously typed into the search box.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecentSearch {
    pub id: i32,
    pub user_id: UserId,
    pub query: String,
    pub created_at: NaiveDateTime,
}
