pub mod auth;
pub mod validation;

pub use auth::{check_bearer, RequireApiToken};
pub use validation::{ValidatedJson, ValidatedPath, ValidatedQuery};
