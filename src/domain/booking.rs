use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BookingId, ProviderId, TypeConstraintError, UserId};

/// Lifecycle of a service booking.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Customers may only cancel bookings the provider has not completed.
    pub const fn can_cancel(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown booking status `{s}`")))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub provider_id: ProviderId,
    pub scheduled_at: NaiveDateTime,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub amount_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewBooking {
    pub user_id: UserId,
    pub provider_id: ProviderId,
    pub scheduled_at: NaiveDateTime,
    pub notes: Option<String>,
    pub amount_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_values() {
        for status in BookingStatus::ALL {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn only_open_bookings_can_be_cancelled() {
        assert!(BookingStatus::Pending.can_cancel());
        assert!(BookingStatus::Confirmed.can_cancel());
        assert!(!BookingStatus::Completed.can_cancel());
        assert!(!BookingStatus::Cancelled.can_cancel());
    }
}
