//! Business operations invoked by the HTTP handlers.
//!
//! Services are generic over the repository traits so they can be exercised
//! against [`crate::repository::mock::MockRepository`] in tests.

use thiserror::Error;

pub mod admin;
pub mod bookings;
pub mod catalog;
pub mod donations;
pub mod email;
pub mod notifications;
pub mod rate_limit;
pub mod rewards;
pub mod rides;
pub mod suggestions;
pub mod wallet;

/// Page size used by list endpoints.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Insufficient funds: {available} available, {requested} requested")]
    InsufficientFunds { available: i64, requested: i64 },

    #[error("Rate limit exceeded, retry in {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
