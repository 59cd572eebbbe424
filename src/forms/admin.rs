use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SetRoleForm {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct SetActiveForm {
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetVerifiedForm {
    pub is_verified: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetBookingStatusForm {
    pub status: String,
}
