pub mod actor_service;
pub mod movie_service;
pub mod rating_service;
pub mod seed_service;
pub mod validation;
pub mod views;

pub use actor_service::*;
pub use movie_service::*;
pub use rating_service::*;
pub use seed_service::*;
pub use validation::{Validate, ValidationService};
pub use views::*;
