use diesel::prelude::*;

use crate::domain::donation::{Donation, NewDonation};
use crate::domain::types::UserId;
use crate::domain::wallet::NewWalletTransaction;
use crate::models::donation::{Donation as DbDonation, NewDonation as DbNewDonation};
use crate::repository::errors::{RepositoryError, RepositoryResult, TxError};
use crate::repository::wallet::insert_checked;
use crate::repository::{DieselRepository, DonationReader, DonationWriter};

impl DonationReader for DieselRepository {
    fn list_user_donations(&self, user_id: UserId) -> RepositoryResult<Vec<Donation>> {
        use crate::schema::donations;

        let mut conn = self.conn()?;
        donations::table
            .filter(donations::user_id.eq(user_id.get()))
            .order((donations::created_at.desc(), donations::id.desc()))
            .load::<DbDonation>(&mut conn)?
            .into_iter()
            .map(|d| Donation::try_from(d).map_err(RepositoryError::from))
            .collect()
    }
}

impl DonationWriter for DieselRepository {
    fn create_donation(
        &self,
        donation: &NewDonation,
        debit: &NewWalletTransaction,
    ) -> RepositoryResult<Donation> {
        use crate::schema::donations;

        let mut conn = self.conn()?;
        let db_new: DbNewDonation = donation.into();

        let created = conn
            .immediate_transaction::<_, TxError, _>(|conn| {
                insert_checked(conn, debit)?;
                let created = diesel::insert_into(donations::table)
                    .values(&db_new)
                    .get_result::<DbDonation>(conn)?;
                Ok(created)
            })
            .map_err(RepositoryError::from)?;

        Donation::try_from(created).map_err(RepositoryError::from)
    }
}
