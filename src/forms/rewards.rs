use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RedeemPointsForm {
    pub points: i64,
}
