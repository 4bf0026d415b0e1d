use thiserror::Error;

use crate::repository::RepositoryError;

pub mod cart;
pub mod catalog;
pub mod discounts;
pub mod products;

/// Result type returned by service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer to the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The targeted record does not exist.
    #[error("not found")]
    NotFound,
    /// The submitted payload failed validation.
    #[error("invalid input: {0}")]
    Form(String),
    /// Any other persistence failure.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}
