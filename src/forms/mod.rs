//! Request bodies accepted by the JSON API and their conversion into domain values.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod admin;
pub mod bookings;
pub mod donations;
pub mod email;
pub mod rewards;
pub mod rides;
pub mod search;
pub mod wallet;

#[derive(Debug, Error)]
/// Errors that can occur when processing request bodies.
pub enum FormError {
    #[error("{}", describe_validation(.0))]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Constraint(#[from] TypeConstraintError),

    #[error("{0}")]
    InvalidPayload(String),
}

/// Flattens validator output into one line, fields in alphabetical order.
pub fn describe_validation(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .map(|(field, errs)| {
            errs.first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
