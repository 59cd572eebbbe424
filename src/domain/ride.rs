//! Taxi ride booking and its status progression.
//!
//! A ride moves forward through
//! `requesting -> driver_assigned -> driver_arriving -> pickup -> in_transit -> completed`
//! and may be cancelled until the rider has been picked up.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Address, RideId, TypeConstraintError, UserId};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Requesting,
    DriverAssigned,
    DriverArriving,
    Pickup,
    InTransit,
    Completed,
    Cancelled,
}

impl RideStatus {
    pub const ALL: [RideStatus; 7] = [
        RideStatus::Requesting,
        RideStatus::DriverAssigned,
        RideStatus::DriverArriving,
        RideStatus::Pickup,
        RideStatus::InTransit,
        RideStatus::Completed,
        RideStatus::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            RideStatus::Requesting => "requesting",
            RideStatus::DriverAssigned => "driver_assigned",
            RideStatus::DriverArriving => "driver_arriving",
            RideStatus::Pickup => "pickup",
            RideStatus::InTransit => "in_transit",
            RideStatus::Completed => "completed",
            RideStatus::Cancelled => "cancelled",
        }
    }

    /// Rider-facing text for the status banner.
    pub const fn message(self) -> &'static str {
        match self {
            RideStatus::Requesting => "Finding a driver near you...",
            RideStatus::DriverAssigned => "Driver assigned! They will be on their way shortly.",
            RideStatus::DriverArriving => "Your driver is on the way to your pickup point.",
            RideStatus::Pickup => "Your driver has arrived at the pickup point.",
            RideStatus::InTransit => "On the way to your destination.",
            RideStatus::Completed => "You have arrived. Thanks for riding with HopiGo!",
            RideStatus::Cancelled => "This ride was cancelled.",
        }
    }

    /// The status that follows this one, or `None` for terminal statuses.
    pub const fn next(self) -> Option<RideStatus> {
        match self {
            RideStatus::Requesting => Some(RideStatus::DriverAssigned),
            RideStatus::DriverAssigned => Some(RideStatus::DriverArriving),
            RideStatus::DriverArriving => Some(RideStatus::Pickup),
            RideStatus::Pickup => Some(RideStatus::InTransit),
            RideStatus::InTransit => Some(RideStatus::Completed),
            RideStatus::Completed | RideStatus::Cancelled => None,
        }
    }

    pub const fn can_cancel(self) -> bool {
        matches!(
            self,
            RideStatus::Requesting | RideStatus::DriverAssigned | RideStatus::DriverArriving
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, RideStatus::Completed | RideStatus::Cancelled)
    }
}

impl Display for RideStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RideStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RideStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown ride status `{s}`")))
    }
}

/// Vehicle classes offered in the taxi screen.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Economy,
    Comfort,
    Xl,
}

impl VehicleType {
    pub const fn as_str(self) -> &'static str {
        match self {
            VehicleType::Economy => "economy",
            VehicleType::Comfort => "comfort",
            VehicleType::Xl => "xl",
        }
    }

    /// Flat fare estimate in cents.
    pub const fn base_fare_cents(self) -> i64 {
        match self {
            VehicleType::Economy => 1_200,
            VehicleType::Comfort => 1_800,
            VehicleType::Xl => 2_500,
        }
    }
}

impl Display for VehicleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "economy" => Ok(VehicleType::Economy),
            "comfort" => Ok(VehicleType::Comfort),
            "xl" => Ok(VehicleType::Xl),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown vehicle type `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Ride {
    pub id: RideId,
    pub user_id: UserId,
    pub pickup_address: Address,
    pub dropoff_address: Address,
    pub vehicle_type: VehicleType,
    pub fare_cents: i64,
    pub driver_name: Option<String>,
    pub status: RideStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewRide {
    pub user_id: UserId,
    pub pickup_address: Address,
    pub dropoff_address: Address,
    pub vehicle_type: VehicleType,
    pub fare_cents: i64,
}

impl NewRide {
    pub fn new(
        user_id: UserId,
        pickup_address: Address,
        dropoff_address: Address,
        vehicle_type: VehicleType,
    ) -> Self {
        Self {
            user_id,
            pickup_address,
            dropoff_address,
            vehicle_type,
            fare_cents: vehicle_type.base_fare_cents(),
        }
    }
}

/// Fields changed when a ride moves to another status.
///
/// The change only applies while the ride is still in `from`.
#[derive(Clone, Debug)]
pub struct RideStatusChange {
    pub from: RideStatus,
    pub status: RideStatus,
    pub driver_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_for_in_progress_statuses() {
        assert_eq!(RideStatus::Requesting.message(), "Finding a driver near you...");
        assert_eq!(
            RideStatus::DriverAssigned.message(),
            "Driver assigned! They will be on their way shortly."
        );
        assert_eq!(
            RideStatus::DriverArriving.message(),
            "Your driver is on the way to your pickup point."
        );
        assert_eq!(
            RideStatus::Pickup.message(),
            "Your driver has arrived at the pickup point."
        );
        assert_eq!(RideStatus::InTransit.message(), "On the way to your destination.");
    }

    #[test]
    fn status_strings_round_trip() {
        for status in RideStatus::ALL {
            assert_eq!(status.as_str().parse::<RideStatus>().unwrap(), status);
        }
        assert!("teleporting".parse::<RideStatus>().is_err());
    }

    #[test]
    fn progression_ends_at_completed() {
        let mut status = RideStatus::Requesting;
        let mut visited = vec![status];
        while let Some(next) = status.next() {
            status = next;
            visited.push(status);
        }
        assert_eq!(visited.len(), 6);
        assert_eq!(status, RideStatus::Completed);
        assert_eq!(RideStatus::Cancelled.next(), None);
    }

    #[test]
    fn cancellation_only_before_pickup() {
        assert!(RideStatus::Requesting.can_cancel());
        assert!(RideStatus::DriverArriving.can_cancel());
        assert!(!RideStatus::Pickup.can_cancel());
        assert!(!RideStatus::InTransit.can_cancel());
        assert!(!RideStatus::Completed.can_cancel());
    }

    #[test]
    fn fare_follows_vehicle_type() {
        let ride = NewRide::new(
            UserId::new(1).unwrap(),
            Address::new("1 Main St").unwrap(),
            Address::new("9 Elm St").unwrap(),
            VehicleType::Comfort,
        );
        assert_eq!(ride.fare_cents, 1_800);
    }
}
