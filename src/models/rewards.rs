use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::rewards::{NewRewardEvent as DomainNewRewardEvent, RewardEvent as DomainRewardEvent};
use crate::domain::types::{TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::reward_events)]
pub struct RewardEvent {
    pub id: i32,
    pub user_id: i32,
    pub points: i32,
    pub reason: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reward_events)]
pub struct NewRewardEvent<'a> {
    pub user_id: i32,
    pub points: i32,
    pub reason: &'a str,
}

impl TryFrom<RewardEvent> for DomainRewardEvent {
    type Error = TypeConstraintError;

    fn try_from(event: RewardEvent) -> Result<Self, Self::Error> {
        Ok(Self {
            id: event.id,
            user_id: UserId::try_from(event.user_id)?,
            points: i64::from(event.points),
            reason: event.reason,
            created_at: event.created_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewRewardEvent> for NewRewardEvent<'a> {
    type Error = TypeConstraintError;

    fn try_from(event: &'a DomainNewRewardEvent) -> Result<Self, Self::Error> {
        let points = i32::try_from(event.points).map_err(|_| {
            TypeConstraintError::InvalidValue(format!("points out of range: {}", event.points))
        })?;
        Ok(Self {
            user_id: event.user_id.get(),
            points,
            reason: event.reason.as_str(),
        })
    }
}
