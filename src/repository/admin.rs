//! Aggregate queries backing the admin dashboard.

use std::collections::BTreeMap;

use chrono::Utc;
use diesel::dsl::{count_star, sql};
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::domain::admin::{AnalyticsSnapshot, BackupSnapshot};
use crate::domain::wallet::TransactionKind;
use crate::models;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AdminReader, DieselRepository};

/// Loads every row of `$table` as `$db` and converts it into `$domain`.
macro_rules! load_all {
    ($conn:expr, $table:ident, $db:ty, $domain:ty) => {{
        use crate::schema::$table;
        $table::table
            .order($table::id.asc())
            .load::<$db>($conn)?
            .into_iter()
            .map(|row| <$domain>::try_from(row).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<$domain>>>()?
    }};
}

impl AdminReader for DieselRepository {
    fn analytics(&self) -> RepositoryResult<AnalyticsSnapshot> {
        use crate::schema::{
            donations, ride_bookings, service_bookings, service_providers, users,
            wallet_transactions,
        };

        let mut conn = self.conn()?;

        let total_users = users::table.count().get_result::<i64>(&mut conn)?;
        let active_users = users::table
            .filter(users::is_active.eq(true))
            .count()
            .get_result::<i64>(&mut conn)?;
        let total_providers = service_providers::table
            .count()
            .get_result::<i64>(&mut conn)?;
        let verified_providers = service_providers::table
            .filter(service_providers::is_verified.eq(true))
            .count()
            .get_result::<i64>(&mut conn)?;

        let bookings_by_status: BTreeMap<String, i64> = service_bookings::table
            .group_by(service_bookings::status)
            .select((service_bookings::status, count_star()))
            .load::<(String, i64)>(&mut conn)?
            .into_iter()
            .collect();
        let rides_by_status: BTreeMap<String, i64> = ride_bookings::table
            .group_by(ride_bookings::status)
            .select((ride_bookings::status, count_star()))
            .load::<(String, i64)>(&mut conn)?
            .into_iter()
            .collect();

        let donation_total_cents = donations::table
            .select(sql::<BigInt>("COALESCE(SUM(amount_cents), 0)"))
            .first::<i64>(&mut conn)?;
        let top_up_total_cents = wallet_transactions::table
            .filter(wallet_transactions::kind.eq(TransactionKind::TopUp.as_str()))
            .select(sql::<BigInt>("COALESCE(SUM(amount_cents), 0)"))
            .first::<i64>(&mut conn)?;

        Ok(AnalyticsSnapshot {
            total_users,
            active_users,
            total_providers,
            verified_providers,
            bookings_by_status,
            rides_by_status,
            donation_total_cents,
            top_up_total_cents,
        })
    }

    fn backup(&self) -> RepositoryResult<BackupSnapshot> {
        use crate::domain;

        let mut conn = self.conn()?;
        let conn = &mut conn;

        Ok(BackupSnapshot {
            exported_at: Utc::now().naive_utc(),
            users: load_all!(
                conn,
                users,
                models::user::User,
                domain::user::User
            ),
            categories: load_all!(
                conn,
                service_categories,
                models::catalog::Category,
                domain::catalog::Category
            ),
            subcategories: load_all!(
                conn,
                service_subcategories,
                models::catalog::Subcategory,
                domain::catalog::Subcategory
            ),
            providers: load_all!(
                conn,
                service_providers,
                models::provider::Provider,
                domain::provider::Provider
            ),
            bookings: load_all!(
                conn,
                service_bookings,
                models::booking::Booking,
                domain::booking::Booking
            ),
            rides: load_all!(
                conn,
                ride_bookings,
                models::ride::Ride,
                domain::ride::Ride
            ),
            wallet_transactions: load_all!(
                conn,
                wallet_transactions,
                models::wallet::WalletTransaction,
                domain::wallet::WalletTransaction
            ),
            reward_events: load_all!(
                conn,
                reward_events,
                models::rewards::RewardEvent,
                domain::rewards::RewardEvent
            ),
            donations: load_all!(
                conn,
                donations,
                models::donation::Donation,
                domain::donation::Donation
            ),
            notifications: load_all!(
                conn,
                notifications,
                models::notification::Notification,
                domain::notification::Notification
            ),
            recent_searches: load_all!(
                conn,
                recent_searches,
                models::search::RecentSearch,
                domain::search::RecentSearch
            ),
        })
    }

    fn ping(&self) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        diesel::sql_query("SELECT 1").execute(&mut conn)?;
        Ok(())
    }
}
