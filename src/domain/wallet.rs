//! Digital wallet ledger entries and the fuel-station QR payload.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::types::{TypeConstraintError, UserId};

/// Largest single top-up accepted, in cents.
pub const MAX_TOP_UP_CENTS: i64 = 1_000_000;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    TopUp,
    Payment,
    Fuel,
    Donation,
    RewardCredit,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 5] = [
        TransactionKind::TopUp,
        TransactionKind::Payment,
        TransactionKind::Fuel,
        TransactionKind::Donation,
        TransactionKind::RewardCredit,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            TransactionKind::TopUp => "top_up",
            TransactionKind::Payment => "payment",
            TransactionKind::Fuel => "fuel",
            TransactionKind::Donation => "donation",
            TransactionKind::RewardCredit => "reward_credit",
        }
    }

    /// Credits add to the balance, everything else is a debit.
    pub const fn is_credit(self) -> bool {
        matches!(self, TransactionKind::TopUp | TransactionKind::RewardCredit)
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                TypeConstraintError::InvalidValue(format!("unknown transaction kind `{s}`"))
            })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WalletTransaction {
    pub id: i32,
    pub user_id: UserId,
    pub kind: TransactionKind,
    /// Signed: credits are positive, debits negative.
    pub amount_cents: i64,
    pub description: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewWalletTransaction {
    pub user_id: UserId,
    pub kind: TransactionKind,
    pub amount_cents: i64,
    pub description: String,
}

impl NewWalletTransaction {
    /// Builds a ledger entry, signing `cents` according to `kind`.
    pub fn new(user_id: UserId, kind: TransactionKind, cents: i64, description: impl Into<String>) -> Self {
        let magnitude = cents.abs();
        let amount_cents = if kind.is_credit() { magnitude } else { -magnitude };
        Self {
            user_id,
            kind,
            amount_cents,
            description: description.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QrPayloadError {
    #[error("QR code is not a valid fuel payment code")]
    Malformed,
    #[error("QR code does not name a fuel station")]
    MissingStation,
    #[error("pump number is required")]
    MissingPump,
}

/// Contents of the QR code printed on a fuel pump.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FuelQrPayload {
    pub station_id: String,
    pub station_name: Option<String>,
    pub pump_number: String,
}

impl FuelQrPayload {
    /// Parses the JSON encoded in a pump QR code.
    ///
    /// Pump numbers may be encoded as strings or integers.
    pub fn parse(raw: &str) -> Result<Self, QrPayloadError> {
        let value: Value = serde_json::from_str(raw.trim()).map_err(|_| QrPayloadError::Malformed)?;
        let object = value.as_object().ok_or(QrPayloadError::Malformed)?;

        let station_id = object
            .get("station_id")
            .and_then(scalar_to_string)
            .ok_or(QrPayloadError::MissingStation)?;
        let pump_number = object
            .get("pump_number")
            .and_then(scalar_to_string)
            .ok_or(QrPayloadError::MissingPump)?;
        let station_name = object
            .get("station_name")
            .and_then(scalar_to_string);

        Ok(Self {
            station_id,
            station_name,
            pump_number,
        })
    }

    pub fn describe(&self) -> String {
        let station = self.station_name.as_deref().unwrap_or(&self.station_id);
        format!("Fuel at {station}, pump {}", self.pump_number)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
