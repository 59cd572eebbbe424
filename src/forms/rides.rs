use serde::Deserialize;
use validator::Validate;

use crate::domain::ride::{NewRide, RideStatus, VehicleType};
use crate::domain::types::{Address, UserId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct RequestRideForm {
    #[validate(length(min = 1, max = 255, message = "Pickup address is required"))]
    pub pickup_address: String,
    #[validate(length(min = 1, max = 255, message = "Destination address is required"))]
    pub dropoff_address: String,
    #[serde(default = "default_vehicle")]
    pub vehicle_type: String,
}

fn default_vehicle() -> String {
    VehicleType::Economy.as_str().to_string()
}

impl RequestRideForm {
    pub fn into_new_ride(self, user_id: UserId) -> Result<NewRide, FormError> {
        self.validate()?;
        let pickup = Address::new(self.pickup_address)?;
        let dropoff = Address::new(self.dropoff_address)?;
        let vehicle: VehicleType = self.vehicle_type.parse()?;
        Ok(NewRide::new(user_id, pickup, dropoff, vehicle))
    }
}

/// Body of the dispatcher endpoint that moves a ride along.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AdvanceRideForm {
    /// Target status; defaults to the next one in the flow.
    pub status: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub driver_name: Option<String>,
}

impl AdvanceRideForm {
    pub fn target(&self) -> Result<Option<RideStatus>, FormError> {
        self.validate()?;
        Ok(self
            .status
            .as_deref()
            .map(str::parse::<RideStatus>)
            .transpose()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_pickup_is_rejected() {
        let form = RequestRideForm {
            pickup_address: "   ".to_string(),
            dropoff_address: "Airport".to_string(),
            vehicle_type: "comfort".to_string(),
        };
        assert!(form.into_new_ride(UserId::new(1).unwrap()).is_err());
    }

    #[test]
    fn fare_follows_vehicle_type() {
        let form = RequestRideForm {
            pickup_address: "Main St 1".to_string(),
            dropoff_address: "Airport".to_string(),
            vehicle_type: "XL".to_string(),
        };
        let ride = form.into_new_ride(UserId::new(1).unwrap()).unwrap();
        assert_eq!(ride.vehicle_type, VehicleType::Xl);
        assert_eq!(ride.fare_cents, 2_500);
    }

    #[test]
    fn unknown_target_status_is_rejected() {
        let form = AdvanceRideForm {
            status: Some("teleporting".to_string()),
            driver_name: None,
        };
        assert!(form.target().is_err());
    }
}
