use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failures reported by the relational store.
///
/// Constraint violations stay distinguishable from generic outages so the
/// HTTP layer can answer 409 instead of 5xx.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn timeout(op: &str) -> Self {
        Self::Unavailable(format!("{op} timed out"))
    }
}

impl From<DbErr> for StorageError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::ConstraintViolation(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::ConstraintViolation(msg),
            _ => Self::Unavailable(e.to_string()),
        }
    }
}
