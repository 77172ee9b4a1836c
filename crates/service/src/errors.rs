use models::errors::StorageError;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<StorageError> for ServiceError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::ConstraintViolation(msg) => Self::ConstraintViolation(msg),
            StorageError::Unavailable(msg) => Self::StorageUnavailable(msg),
        }
    }
}

impl ServiceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::ConstraintViolation(_) => 1002,
            ServiceError::StorageUnavailable(_) => 1200,
        }
    }
}
