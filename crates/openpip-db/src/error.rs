//! Database error types.

use openpip_common::{ApiError, FieldErrors};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

/// Message reported when a `uniprot_id` is already taken.
pub const DUPLICATE_UNIPROT_MESSAGE: &str = "protein with this uniprot id already exists.";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQL error: {0}")]
    Sql(sqlx::Error),

    #[error("Protein not found: {0}")]
    NotFound(i64),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        // The only UNIQUE column is uniprot_id.
        let unique = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());
        if unique {
            DbError::Duplicate(err.to_string())
        } else {
            DbError::Sql(err)
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(id) => ApiError::NotFound(format!("protein {id}")),
            DbError::Duplicate(_) => {
                ApiError::Conflict(FieldErrors::single("uniprot_id", DUPLICATE_UNIPROT_MESSAGE))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
