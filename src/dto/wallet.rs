use serde::Serialize;

use crate::domain::wallet::WalletTransaction;

#[derive(Debug, Serialize)]
pub struct WalletSummary {
    pub balance_cents: i64,
    /// Balance formatted as a decimal string, e.g. `"12.50"`.
    pub balance: String,
    pub transactions: Vec<WalletTransaction>,
}
