use serde::Serialize;

use crate::domain::rewards::{RewardEvent, RewardTier};

#[derive(Debug, Serialize)]
pub struct RewardsSummary {
    pub points: i64,
    pub tier: RewardTier,
    /// `None` once the top tier is reached.
    pub points_to_next_tier: Option<i64>,
    pub events: Vec<RewardEvent>,
}
