//! Errors raised by the catalog services
//!
//! ```rust
//! use movie_catalog::errors::{CatalogError, ValidationError};
//!
//! let err: CatalogError = ValidationError::field("score", "out of range").into();
//! assert!(err.is_validation_error());
//! ```

use thiserror::Error;

use super::ValidationError;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// An id-keyed lookup found nothing
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// Input failed type, range or shape constraints
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Store failure, surfaced unmodified
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        CatalogError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, CatalogError::Validation(_))
    }

    /// Stable error code used in API responses and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::NotFound { .. } => "NOT_FOUND",
            CatalogError::Validation(_) => "VALIDATION_FAILED",
            CatalogError::Database(_) => "DATABASE_ERROR",
        }
    }
}
