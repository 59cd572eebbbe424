use crate::domain::donation::{Donation, PRESET_AMOUNTS};
use crate::domain::wallet::{NewWalletTransaction, TransactionKind};
use crate::forms::donations::DonationForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{DonationReader, DonationWriter};
use crate::services::{ServiceError, ServiceResult};

/// Quick-pick amounts offered by the donation screen, in whole units.
pub fn preset_amounts() -> &'static [i64] {
    &PRESET_AMOUNTS
}

/// Records a donation paid from the wallet.
pub fn donate<R>(repo: &R, user: &AuthenticatedUser, form: DonationForm) -> ServiceResult<Donation>
where
    R: DonationWriter + ?Sized,
{
    let donation = form.into_new_donation(user.id)?;
    let debit = NewWalletTransaction::new(
        user.id,
        TransactionKind::Donation,
        donation.amount.cents(),
        format!("Donation to {}", donation.cause),
    );

    let created = repo.create_donation(&donation, &debit).map_err(|err| {
        log::error!("Failed to record donation: {err}");
        err
    })?;
    log::info!(
        "User {} donated {} to {}",
        user.id,
        donation.amount,
        donation.cause
    );
    Ok(created)
}

pub fn list_donations<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Donation>>
where
    R: DonationReader + ?Sized,
{
    repo.list_user_donations(user.id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::UserId;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(2).unwrap(),
            email: "d@example.com".to_string(),
            roles: vec![],
        }
    }

    fn form(amount: &str) -> DonationForm {
        DonationForm {
            cause: "School meals".to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn empty_amount_is_a_validation_error() {
        let repo = MockRepository::new();
        assert!(matches!(
            donate(&repo, &user(), form("")),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        let repo = MockRepository::new();
        for amount in ["0", "0.00", "-5"] {
            assert!(matches!(
                donate(&repo, &user(), form(amount)),
                Err(ServiceError::Validation(_))
            ));
        }
    }

    #[test]
    fn donation_debits_the_wallet() {
        let mut repo = MockRepository::new();
        repo.expect_create_donation()
            .withf(|donation, debit| {
                donation.amount.cents() == 2_500
                    && debit.kind == TransactionKind::Donation
                    && debit.amount_cents == -2_500
                    && debit.description == "Donation to School meals"
            })
            .returning(|donation, _| {
                Ok(Donation {
                    id: 1,
                    user_id: donation.user_id,
                    cause: donation.cause.clone(),
                    amount_cents: donation.amount.cents(),
                    created_at: Utc::now().naive_utc(),
                })
            });

        let created = donate(&repo, &user(), form("25")).unwrap();

        assert_eq!(created.amount_cents, 2_500);
    }

    #[test]
    fn empty_wallet_cannot_donate() {
        let mut repo = MockRepository::new();
        repo.expect_create_donation().returning(|_, _| {
            Err(RepositoryError::InsufficientBalance {
                available: 0,
                requested: 1_000,
            })
        });

        assert!(matches!(
            donate(&repo, &user(), form("10")),
            Err(ServiceError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn presets_match_the_donation_screen() {
        assert_eq!(preset_amounts(), &[5, 10, 25, 50, 100]);
    }
}
