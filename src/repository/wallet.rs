//! Repository implementation for the wallet ledger.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;

use crate::domain::types::UserId;
use crate::domain::wallet::{NewWalletTransaction, WalletTransaction};
use crate::models::wallet::{
    NewWalletTransaction as DbNewWalletTransaction, WalletTransaction as DbWalletTransaction,
};
use crate::repository::errors::{RepositoryError, RepositoryResult, TxError};
use crate::repository::{DieselRepository, WalletReader, WalletWriter};

pub(crate) fn balance_of(conn: &mut SqliteConnection, user_id: UserId) -> QueryResult<i64> {
    use crate::schema::wallet_transactions;

    wallet_transactions::table
        .filter(wallet_transactions::user_id.eq(user_id.get()))
        .select(sql::<BigInt>("COALESCE(SUM(amount_cents), 0)"))
        .first::<i64>(conn)
}

/// Inserts `tx`, refusing debits that would overdraw the wallet.
/// Must run inside a transaction.
pub(crate) fn insert_checked(
    conn: &mut SqliteConnection,
    tx: &NewWalletTransaction,
) -> Result<DbWalletTransaction, TxError> {
    use crate::schema::wallet_transactions;

    if tx.amount_cents < 0 {
        let available = balance_of(conn, tx.user_id)?;
        let requested = -tx.amount_cents;
        if available < requested {
            return Err(RepositoryError::InsufficientBalance {
                available,
                requested,
            }
            .into());
        }
    }

    let db_new: DbNewWalletTransaction = tx.into();
    let inserted = diesel::insert_into(wallet_transactions::table)
        .values(&db_new)
        .get_result::<DbWalletTransaction>(conn)?;
    Ok(inserted)
}

impl WalletReader for DieselRepository {
    fn wallet_balance(&self, user_id: UserId) -> RepositoryResult<i64> {
        let mut conn = self.conn()?;
        Ok(balance_of(&mut conn, user_id)?)
    }

    fn list_wallet_transactions(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> RepositoryResult<Vec<WalletTransaction>> {
        use crate::schema::wallet_transactions;

        let mut conn = self.conn()?;
        wallet_transactions::table
            .filter(wallet_transactions::user_id.eq(user_id.get()))
            .order((wallet_transactions::created_at.desc(), wallet_transactions::id.desc()))
            .limit(limit as i64)
            .load::<DbWalletTransaction>(&mut conn)?
            .into_iter()
            .map(|tx| WalletTransaction::try_from(tx).map_err(RepositoryError::from))
            .collect()
    }
}

impl WalletWriter for DieselRepository {
    fn record_wallet_transaction(
        &self,
        tx: &NewWalletTransaction,
    ) -> RepositoryResult<WalletTransaction> {
        let mut conn = self.conn()?;
        let inserted = conn
            .immediate_transaction::<_, TxError, _>(|conn| insert_checked(conn, tx))
            .map_err(RepositoryError::from)?;

        WalletTransaction::try_from(inserted).map_err(RepositoryError::from)
    }
}
