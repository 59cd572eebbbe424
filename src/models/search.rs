use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::search::RecentSearch as DomainRecentSearch;
use crate::domain::types::{TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::recent_searches)]
pub struct RecentSearch {
    pub id: i32,
    pub user_id: i32,
    pub query: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recent_searches)]
pub struct NewRecentSearch<'a> {
    pub user_id: i32,
    pub query: &'a str,
}

impl TryFrom<RecentSearch> for DomainRecentSearch {
    type Error = TypeConstraintError;

    fn try_from(search: RecentSearch) -> Result<Self, Self::Error> {
        Ok(Self {
            id: search.id,
            user_id: UserId::try_from(search.user_id)?,
            query: search.query,
            created_at: search.created_at,
        })
    }
}
