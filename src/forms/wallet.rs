use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct TopUpForm {
    /// Decimal amount such as `"25"` or `"12.50"`.
    #[validate(length(min = 1, message = "Amount is required"))]
    pub amount: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FuelPaymentForm {
    /// Raw text scanned from the pump's QR code.
    #[validate(length(min = 1, message = "QR code is required"))]
    pub qr_payload: String,
    #[validate(length(min = 1, message = "Amount is required"))]
    pub amount: String,
}

/// Direct wallet payment to a merchant.
#[derive(Debug, Deserialize, Validate)]
pub struct PaymentForm {
    #[validate(length(min = 1, message = "Amount is required"))]
    pub amount: String,
    #[validate(length(min = 1, max = 200, message = "Payment description is required"))]
    pub description: String,
}
