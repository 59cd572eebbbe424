//! Digital wallet: balance, top-ups and payments.
//!
//! The balance is the sum of the signed ledger; debits that would overdraw it
//! are refused by the repository inside the same transaction as the insert.

use validator::Validate;

use crate::domain::types::{Amount, display_cents};
use crate::domain::wallet::{
    FuelQrPayload, MAX_TOP_UP_CENTS, NewWalletTransaction, TransactionKind, WalletTransaction,
};
use crate::dto::wallet::WalletSummary;
use crate::forms::FormError;
use crate::forms::wallet::{FuelPaymentForm, PaymentForm, TopUpForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{WalletReader, WalletWriter};
use crate::services::{ServiceError, ServiceResult};

/// Ledger entries shown alongside the balance.
pub const RECENT_TRANSACTIONS: usize = 50;

pub fn wallet_summary<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<WalletSummary>
where
    R: WalletReader + ?Sized,
{
    let balance_cents = repo.wallet_balance(user.id).map_err(|err| {
        log::error!("Failed to load wallet balance: {err}");
        err
    })?;
    let transactions = repo.list_wallet_transactions(user.id, RECENT_TRANSACTIONS)?;

    Ok(WalletSummary {
        balance_cents,
        balance: display_cents(balance_cents),
        transactions,
    })
}

pub fn top_up<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: TopUpForm,
) -> ServiceResult<WalletTransaction>
where
    R: WalletWriter + ?Sized,
{
    form.validate().map_err(FormError::from)?;
    let amount: Amount = form.amount.parse()?;
    if amount.cents() > MAX_TOP_UP_CENTS {
        return Err(ServiceError::Validation(format!(
            "A single top-up is limited to {}",
            display_cents(MAX_TOP_UP_CENTS)
        )));
    }

    let tx = NewWalletTransaction::new(
        user.id,
        TransactionKind::TopUp,
        amount.cents(),
        "Wallet top-up",
    );
    repo.record_wallet_transaction(&tx)
        .map_err(ServiceError::from)
}

pub fn pay<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: PaymentForm,
) -> ServiceResult<WalletTransaction>
where
    R: WalletWriter + ?Sized,
{
    form.validate().map_err(FormError::from)?;
    let amount: Amount = form.amount.parse()?;
    let description = ammonia::clean(form.description.trim());

    let tx = NewWalletTransaction::new(
        user.id,
        TransactionKind::Payment,
        amount.cents(),
        description,
    );
    repo.record_wallet_transaction(&tx)
        .map_err(ServiceError::from)
}

/// Pays for fuel at the pump named by a scanned QR code.
pub fn pay_fuel<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: FuelPaymentForm,
) -> ServiceResult<WalletTransaction>
where
    R: WalletWriter + ?Sized,
{
    form.validate().map_err(FormError::from)?;
    let payload = FuelQrPayload::parse(&form.qr_payload)?;
    let amount: Amount = form.amount.parse()?;

    let tx = NewWalletTransaction::new(
        user.id,
        TransactionKind::Fuel,
        amount.cents(),
        ammonia::clean(&payload.describe()),
    );
    let recorded = repo.record_wallet_transaction(&tx)?;
    log::info!(
        "Fuel payment {} at station {} pump {}",
        recorded.id,
        payload.station_id,
        payload.pump_number
    );
    Ok(recorded)
}
