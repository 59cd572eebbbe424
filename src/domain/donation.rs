use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Amount, DonationCause, TypeConstraintError, UserId};

/// Amounts offered as one-tap buttons, in whole currency units.
pub const PRESET_AMOUNTS: [i64; 5] = [5, 10, 25, 50, 100];
/// Largest single donation accepted, in cents.
pub const MAX_DONATION_CENTS: i64 = 1_000_000;

/// Parses the amount picker's input, either a preset or a custom entry.
pub fn parse_donation_amount(input: &str) -> Result<Amount, TypeConstraintError> {
    let amount: Amount = input.parse()?;
    if amount.cents() > MAX_DONATION_CENTS {
        return Err(TypeConstraintError::InvalidValue(format!(
            "donations are limited to {}",
            MAX_DONATION_CENTS / 100
        )));
    }
    Ok(amount)
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Donation {
    pub id: i32,
    pub user_id: UserId,
    pub cause: DonationCause,
    pub amount_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewDonation {
    pub user_id: UserId,
    pub cause: DonationCause,
    pub amount: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_amount_is_rejected() {
        assert_eq!(parse_donation_amount(""), Err(TypeConstraintError::EmptyString));
        assert_eq!(parse_donation_amount("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn presets_and_custom_amounts_parse() {
        for preset in PRESET_AMOUNTS {
            let amount = parse_donation_amount(&preset.to_string()).unwrap();
            assert_eq!(amount.cents(), preset * 100);
        }
        assert_eq!(parse_donation_amount("7.25").unwrap().cents(), 725);
    }

    #[test]
    fn zero_and_oversized_amounts_are_rejected() {
        assert_eq!(
            parse_donation_amount("0"),
            Err(TypeConstraintError::NonPositiveAmount)
        );
        assert!(matches!(
            parse_donation_amount("10000.01"),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }
}
