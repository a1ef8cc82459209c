use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::ValidationError;
use crate::services::Validate;

/// JSON body that has been parsed and passed [`Validate`].
///
/// Malformed bodies and missing fields are reported as 400 validation
/// failures rather than axum's default 422.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ValidationError::new(format!("Failed to read request body: {}", e)))?;

        let data: T = serde_json::from_slice(&bytes)
            .map_err(|e| ValidationError::new(format!("Invalid JSON: {}", e)))?;

        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

/// Path parameters whose parse failures render as validation errors.
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| ValidatedPath(value))
            .map_err(|rejection| ValidationError::new(rejection.body_text()))
    }
}

/// Query string whose parse failures render as validation errors.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| ValidatedQuery(value))
            .map_err(|rejection| ValidationError::new(rejection.body_text()))
    }
}
