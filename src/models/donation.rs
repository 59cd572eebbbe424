use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::donation::{Donation as DomainDonation, NewDonation as DomainNewDonation};
use crate::domain::types::{DonationCause, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::donations)]
pub struct Donation {
    pub id: i32,
    pub user_id: i32,
    pub cause: String,
    pub amount_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::donations)]
pub struct NewDonation<'a> {
    pub user_id: i32,
    pub cause: &'a str,
    pub amount_cents: i64,
}

impl TryFrom<Donation> for DomainDonation {
    type Error = TypeConstraintError;

    fn try_from(donation: Donation) -> Result<Self, Self::Error> {
        Ok(Self {
            id: donation.id,
            user_id: UserId::try_from(donation.user_id)?,
            cause: DonationCause::new(donation.cause)?,
            amount_cents: donation.amount_cents,
            created_at: donation.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewDonation> for NewDonation<'a> {
    fn from(donation: &'a DomainNewDonation) -> Self {
        Self {
            user_id: donation.user_id.get(),
            cause: donation.cause.as_str(),
            amount_cents: donation.amount.cents(),
        }
    }
}
