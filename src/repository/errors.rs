//! Errors raised by the persistence layer.

use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A debit would take a wallet or points balance below zero.
    #[error("Insufficient balance: {available} available, {requested} requested")]
    InsufficientBalance { available: i64, requested: i64 },

    /// A conditional update found the row in a different state than expected.
    #[error("Stale state: {0}")]
    StaleState(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

fn constraint_label(kind: &DatabaseErrorKind) -> Option<&'static str> {
    match kind {
        DatabaseErrorKind::UniqueViolation => Some("Unique"),
        DatabaseErrorKind::ForeignKeyViolation => Some("Foreign key"),
        DatabaseErrorKind::NotNullViolation => Some("Not null"),
        DatabaseErrorKind::CheckViolation => Some("Check"),
        _ => None,
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => match constraint_label(&kind) {
                Some(label) => RepositoryError::ConstraintViolation(format!(
                    "{label} constraint violation: {}",
                    info.message()
                )),
                None => RepositoryError::DatabaseError(info.message().to_string()),
            },
            DieselError::SerializationError(e) | DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(format!("Row conversion error: {e}"))
            }
            DieselError::QueryBuilderError(e) => {
                RepositoryError::ValidationError(format!("Query builder error: {e}"))
            }
            DieselError::RollbackTransaction
            | DieselError::AlreadyInTransaction
            | DieselError::NotInTransaction
            | DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError(format!("Transaction error: {err}"))
            }
            _ => RepositoryError::Unexpected(format!("Unexpected diesel error: {err}")),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

/// Error type used inside diesel transactions so domain failures can abort them.
#[derive(Debug)]
pub(crate) enum TxError {
    Diesel(DieselError),
    Repository(RepositoryError),
}

impl From<DieselError> for TxError {
    fn from(err: DieselError) -> Self {
        TxError::Diesel(err)
    }
}

impl From<RepositoryError> for TxError {
    fn from(err: RepositoryError) -> Self {
        TxError::Repository(err)
    }
}

impl From<TxError> for RepositoryError {
    fn from(err: TxError) -> Self {
        match err {
            TxError::Diesel(e) => e.into(),
            TxError::Repository(e) => e,
        }
    }
}
