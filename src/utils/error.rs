//! Error handling for the meal catalog

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Main error type for the meal catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Duplicate primary key: {0}")]
    DuplicateKey(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    #[error("Invalid meal type '{0}', expected one of b, l, d")]
    InvalidMealType(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// True for any store-level constraint failure
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            CatalogError::DuplicateKey(_)
                | CatalogError::ForeignKeyViolation(_)
                | CatalogError::CheckViolation(_)
        )
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message().to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation => return CatalogError::DuplicateKey(message),
                ErrorKind::ForeignKeyViolation => {
                    return CatalogError::ForeignKeyViolation(message)
                }
                ErrorKind::CheckViolation => return CatalogError::CheckViolation(message),
                _ => {}
            }
        }
        CatalogError::Database(err)
    }
}
