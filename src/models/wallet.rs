use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, UserId};
use crate::domain::wallet::{
    NewWalletTransaction as DomainNewWalletTransaction, WalletTransaction as DomainWalletTransaction,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::wallet_transactions)]
pub struct WalletTransaction {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub amount_cents: i64,
    pub description: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::wallet_transactions)]
pub struct NewWalletTransaction<'a> {
    pub user_id: i32,
    pub kind: &'a str,
    pub amount_cents: i64,
    pub description: &'a str,
}

impl TryFrom<WalletTransaction> for DomainWalletTransaction {
    type Error = TypeConstraintError;

    fn try_from(tx: WalletTransaction) -> Result<Self, Self::Error> {
        Ok(Self {
            id: tx.id,
            user_id: UserId::try_from(tx.user_id)?,
            kind: tx.kind.parse()?,
            amount_cents: tx.amount_cents,
            description: tx.description,
            created_at: tx.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewWalletTransaction> for NewWalletTransaction<'a> {
    fn from(tx: &'a DomainNewWalletTransaction) -> Self {
        Self {
            user_id: tx.user_id.get(),
            kind: tx.kind.as_str(),
            amount_cents: tx.amount_cents,
            description: tx.description.as_str(),
        }
    }
}
