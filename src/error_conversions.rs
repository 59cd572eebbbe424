//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! the conversions out of [`TypeConstraintError`] live here.

use crate::domain::types::TypeConstraintError;
#[cfg(feature = "server")]
use crate::domain::wallet::QrPayloadError;
#[cfg(feature = "server")]
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
#[cfg(feature = "server")]
use crate::services::ServiceError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<QrPayloadError> for ServiceError {
    fn from(val: QrPayloadError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::InsufficientBalance {
                available,
                requested,
            } => ServiceError::InsufficientFunds {
                available,
                requested,
            },
            RepositoryError::ConstraintViolation(msg) | RepositoryError::StaleState(msg) => {
                ServiceError::Conflict(msg)
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
