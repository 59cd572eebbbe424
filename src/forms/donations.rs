use serde::Deserialize;
use validator::Validate;

use crate::domain::donation::{NewDonation, parse_donation_amount};
use crate::domain::types::{DonationCause, UserId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct DonationForm {
    #[validate(length(min = 1, max = 120, message = "Choose a cause"))]
    pub cause: String,
    /// One of the preset amounts or a custom decimal string.
    #[serde(default)]
    pub amount: String,
}

impl DonationForm {
    pub fn into_new_donation(self, user_id: UserId) -> Result<NewDonation, FormError> {
        self.validate()?;
        let cause = DonationCause::new(self.cause)?;
        let amount = parse_donation_amount(&self.amount)?;
        Ok(NewDonation {
            user_id,
            cause,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(amount: &str) -> DonationForm {
        DonationForm {
            cause: "Clean water".to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn empty_amount_is_rejected() {
        let user = UserId::new(3).unwrap();
        assert!(form("").into_new_donation(user).is_err());
        assert!(form("   ").into_new_donation(user).is_err());
    }

    #[test]
    fn custom_amount_is_parsed() {
        let donation = form("12.5")
            .into_new_donation(UserId::new(3).unwrap())
            .unwrap();
        assert_eq!(donation.amount.cents(), 1_250);
    }
}
