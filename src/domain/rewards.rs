//! Loyalty points arithmetic.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Amount, UserId};

/// Points awarded per whole currency unit spent.
pub const POINTS_PER_UNIT: i64 = 1;
/// Redemption happens in blocks of this many points.
pub const REDEMPTION_BLOCK: i64 = 100;
/// Wallet credit, in cents, granted per redemption block.
pub const CENTS_PER_BLOCK: i64 = 100;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RewardTier {
    Bronze,
    Silver,
    Gold,
}

impl RewardTier {
    pub const fn for_points(points: i64) -> Self {
        if points >= 5_000 {
            RewardTier::Gold
        } else if points >= 1_000 {
            RewardTier::Silver
        } else {
            RewardTier::Bronze
        }
    }

    /// Points still missing to reach the next tier.
    pub const fn points_to_next(self, points: i64) -> Option<i64> {
        match self {
            RewardTier::Bronze => Some(1_000 - points),
            RewardTier::Silver => Some(5_000 - points),
            RewardTier::Gold => None,
        }
    }
}

/// Points earned for a purchase of `amount`.
pub const fn points_for_spend(amount: Amount) -> i64 {
    amount.whole_units() * POINTS_PER_UNIT
}

/// Wallet credit granted for redeeming `points`, or `None` when `points` is
/// not a positive multiple of [`REDEMPTION_BLOCK`].
pub const fn redemption_value_cents(points: i64) -> Option<i64> {
    if points <= 0 || points % REDEMPTION_BLOCK != 0 {
        None
    } else {
        Some(points / REDEMPTION_BLOCK * CENTS_PER_BLOCK)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RewardEvent {
    pub id: i32,
    pub user_id: UserId,
    pub points: i64,
    pub reason: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewRewardEvent {
    pub user_id: UserId,
    pub points: i64,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(RewardTier::for_points(0), RewardTier::Bronze);
        assert_eq!(RewardTier::for_points(999), RewardTier::Bronze);
        assert_eq!(RewardTier::for_points(1_000), RewardTier::Silver);
        assert_eq!(RewardTier::for_points(5_000), RewardTier::Gold);
        assert_eq!(RewardTier::Silver.points_to_next(1_200), Some(3_800));
        assert_eq!(RewardTier::Gold.points_to_next(9_000), None);
    }

    #[test]
    fn spend_earns_points_per_whole_unit() {
        assert_eq!(points_for_spend(Amount::from_cents(1_299).unwrap()), 12);
        assert_eq!(points_for_spend(Amount::from_cents(99).unwrap()), 0);
    }

    #[test]
    fn redemption_requires_full_blocks() {
        assert_eq!(redemption_value_cents(300), Some(300));
        assert_eq!(redemption_value_cents(150), None);
        assert_eq!(redemption_value_cents(0), None);
        assert_eq!(redemption_value_cents(-100), None);
    }
}
