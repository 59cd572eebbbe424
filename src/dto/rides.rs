use serde::Serialize;

use crate::domain::ride::Ride;

/// Ride row plus the rider-facing description of its status.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RideView {
    #[serde(flatten)]
    pub ride: Ride,
    pub status_message: &'static str,
    pub can_cancel: bool,
}

impl From<Ride> for RideView {
    fn from(ride: Ride) -> Self {
        Self {
            status_message: ride.status.message(),
            can_cancel: ride.status.can_cancel(),
            ride,
        }
    }
}
