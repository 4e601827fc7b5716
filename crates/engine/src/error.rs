//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidInput`] thrown before any statement runs, when the request
//!   lacks data the operation needs.
//! - [`NotFound`] thrown when a lookup matches no expense.
//! - [`WriteRejected`] thrown when storage refuses an insert or update, or
//!   an update matches no row.
//! - [`Scan`] thrown when reading a single expense fails.
//! - [`Database`] thrown when any other read fails.
//!
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`NotFound`]: EngineError::NotFound
//!  [`WriteRejected`]: EngineError::WriteRejected
//!  [`Scan`]: EngineError::Scan
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    WriteRejected(String),
    #[error("can't scan expense: {0}")]
    Scan(DbErr),
    #[error("{0}")]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::WriteRejected(a), Self::WriteRejected(b)) => a == b,
            (Self::Scan(a), Self::Scan(b)) | (Self::Database(a), Self::Database(b)) => {
                a.to_string() == b.to_string()
            }
            _ => false,
        }
    }
}
