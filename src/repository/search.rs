use diesel::prelude::*;

use crate::domain::search::RecentSearch;
use crate::domain::types::UserId;
use crate::models::search::{NewRecentSearch as DbNewRecentSearch, RecentSearch as DbRecentSearch};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, SearchReader, SearchWriter};

impl SearchReader for DieselRepository {
    fn list_recent_searches(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> RepositoryResult<Vec<RecentSearch>> {
        use crate::schema::recent_searches;

        let mut conn = self.conn()?;
        recent_searches::table
            .filter(recent_searches::user_id.eq(user_id.get()))
            .order((recent_searches::created_at.desc(), recent_searches::id.desc()))
            .limit(limit as i64)
            .load::<DbRecentSearch>(&mut conn)?
            .into_iter()
            .map(|s| RecentSearch::try_from(s).map_err(RepositoryError::from))
            .collect()
    }
}

impl SearchWriter for DieselRepository {
    fn record_search(&self, user_id: UserId, query: &str) -> RepositoryResult<RecentSearch> {
        use crate::schema::recent_searches;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(recent_searches::table)
            .values(&DbNewRecentSearch {
                user_id: user_id.get(),
                query,
            })
            .get_result::<DbRecentSearch>(&mut conn)?;

        RecentSearch::try_from(created).map_err(RepositoryError::from)
    }
}
