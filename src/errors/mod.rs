//! Error types for the catalog
//!
//! # Error Categories
//!
//! - **CatalogError**: failures raised by the movie, actor, rating and seed services
//! - **ValidationError**: input rejected before anything reaches the store
//! - **AuthError**: the shared-secret bearer check on mutating endpoints
//!
//! # Examples
//!
//! ```rust
//! use movie_catalog::errors::CatalogError;
//!
//! let err = CatalogError::not_found("Movie", 42);
//! assert_eq!(err.to_string(), "Movie with ID 42 not found");
//! assert!(err.is_not_found());
//! ```

pub mod auth;
pub mod catalog;
pub mod validation;

pub use auth::AuthError;
pub use catalog::CatalogError;
pub use validation::ValidationError;

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type alias for the access gate
pub type AuthResult<T> = Result<T, AuthError>;
