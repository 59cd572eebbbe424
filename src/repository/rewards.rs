//! Repository implementation for loyalty points.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;

use crate::domain::rewards::{NewRewardEvent, RewardEvent};
use crate::domain::types::UserId;
use crate::domain::wallet::{NewWalletTransaction, WalletTransaction};
use crate::models::rewards::{NewRewardEvent as DbNewRewardEvent, RewardEvent as DbRewardEvent};
use crate::repository::errors::{RepositoryError, RepositoryResult, TxError};
use crate::repository::wallet::insert_checked;
use crate::repository::{DieselRepository, RewardReader, RewardWriter};

fn points_of(conn: &mut SqliteConnection, user_id: UserId) -> QueryResult<i64> {
    use crate::schema::reward_events;

    reward_events::table
        .filter(reward_events::user_id.eq(user_id.get()))
        .select(sql::<BigInt>("COALESCE(SUM(points), 0)"))
        .first::<i64>(conn)
}

impl RewardReader for DieselRepository {
    fn reward_points_balance(&self, user_id: UserId) -> RepositoryResult<i64> {
        let mut conn = self.conn()?;
        Ok(points_of(&mut conn, user_id)?)
    }

    fn list_reward_events(&self, user_id: UserId) -> RepositoryResult<Vec<RewardEvent>> {
        use crate::schema::reward_events;

        let mut conn = self.conn()?;
        reward_events::table
            .filter(reward_events::user_id.eq(user_id.get()))
            .order((reward_events::created_at.desc(), reward_events::id.desc()))
            .load::<DbRewardEvent>(&mut conn)?
            .into_iter()
            .map(|e| RewardEvent::try_from(e).map_err(RepositoryError::from))
            .collect()
    }
}

impl RewardWriter for DieselRepository {
    fn create_reward_event(&self, event: &NewRewardEvent) -> RepositoryResult<RewardEvent> {
        use crate::schema::reward_events;

        let mut conn = self.conn()?;
        let db_new = DbNewRewardEvent::try_from(event)?;
        let created = diesel::insert_into(reward_events::table)
            .values(&db_new)
            .get_result::<DbRewardEvent>(&mut conn)?;

        RewardEvent::try_from(created).map_err(RepositoryError::from)
    }

    fn redeem_reward_points(
        &self,
        spend: &NewRewardEvent,
        credit: &NewWalletTransaction,
    ) -> RepositoryResult<WalletTransaction> {
        use crate::schema::reward_events;

        let mut conn = self.conn()?;
        let db_spend = DbNewRewardEvent::try_from(spend)?;

        let inserted = conn
            .immediate_transaction::<_, TxError, _>(|conn| {
                let available = points_of(conn, spend.user_id)?;
                let requested = -spend.points;
                if available < requested {
                    return Err(RepositoryError::InsufficientBalance {
                        available,
                        requested,
                    }
                    .into());
                }

                diesel::insert_into(reward_events::table)
                    .values(&db_spend)
                    .execute(conn)?;
                insert_checked(conn, credit)
            })
            .map_err(RepositoryError::from)?;

        WalletTransaction::try_from(inserted).map_err(RepositoryError::from)
    }
}
