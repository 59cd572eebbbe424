use crate::domain::rewards::{NewRewardEvent, RewardTier, redemption_value_cents};
use crate::domain::types::display_cents;
use crate::domain::wallet::{NewWalletTransaction, TransactionKind, WalletTransaction};
use crate::dto::rewards::RewardsSummary;
use crate::forms::rewards::RedeemPointsForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::errors::RepositoryError;
use crate::repository::{RewardReader, RewardWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn rewards_summary<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<RewardsSummary>
where
    R: RewardReader + ?Sized,
{
    let points = repo.reward_points_balance(user.id).map_err(|err| {
        log::error!("Failed to load reward points: {err}");
        err
    })?;
    let events = repo.list_reward_events(user.id)?;
    let tier = RewardTier::for_points(points);

    Ok(RewardsSummary {
        points,
        tier,
        points_to_next_tier: tier.points_to_next(points),
        events,
    })
}

/// Converts points into wallet credit in blocks of 100.
pub fn redeem_points<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RedeemPointsForm,
) -> ServiceResult<WalletTransaction>
where
    R: RewardWriter + ?Sized,
{
    let credit_cents = redemption_value_cents(form.points).ok_or_else(|| {
        ServiceError::Validation("Points must be redeemed in multiples of 100".to_string())
    })?;

    let spend = NewRewardEvent {
        user_id: user.id,
        points: -form.points,
        reason: "Redeemed for wallet credit".to_string(),
    };
    let credit = NewWalletTransaction::new(
        user.id,
        TransactionKind::RewardCredit,
        credit_cents,
        format!(
            "Redeemed {} points for {}",
            form.points,
            display_cents(credit_cents)
        ),
    );

    repo.redeem_reward_points(&spend, &credit)
        .map_err(|err| match err {
            RepositoryError::InsufficientBalance {
                available,
                requested,
            } => ServiceError::Conflict(format!(
                "Not enough points: {available} available, {requested} requested"
            )),
            other => {
                log::error!("Failed to redeem points: {other}");
                ServiceError::from(other)
            }
        })
}
