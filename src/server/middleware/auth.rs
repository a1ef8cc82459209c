use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::errors::{AuthError, AuthResult};
use crate::server::app::AppState;

/// Checks an `Authorization` header value against the shared secret.
///
/// The `Bearer ` prefix is optional and surrounding whitespace is ignored.
pub fn check_bearer(header: Option<&str>, secret: &str) -> AuthResult<()> {
    let header = match header {
        Some(value) if !value.is_empty() => value.trim(),
        _ => return Err(AuthError::MissingHeader),
    };

    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token == secret {
        Ok(())
    } else {
        Err(AuthError::InvalidToken)
    }
}

/// Extractor guarding mutating endpoints.
///
/// List it before any body extractor so unauthenticated requests are
/// rejected before their payload is looked at.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiToken;

#[async_trait]
impl FromRequestParts<AppState> for RequireApiToken {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| AuthError::InvalidToken)?),
            None => None,
        };

        check_bearer(header, &state.api_secret).map_err(|err| {
            warn!(
                "Rejected {} {} ({}): {}",
                parts.method,
                parts.uri.path(),
                err.error_code(),
                err
            );
            err
        })?;

        Ok(RequireApiToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "s3cret";

    #[test]
    fn missing_header_is_rejected() {
        assert_eq!(check_bearer(None, SECRET), Err(AuthError::MissingHeader));
        assert_eq!(check_bearer(Some(""), SECRET), Err(AuthError::MissingHeader));
    }

    #[test]
    fn wrong_token_is_rejected() {
        assert_eq!(
            check_bearer(Some("Bearer nope"), SECRET),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(check_bearer(Some("   "), SECRET), Err(AuthError::InvalidToken));
    }

    #[test]
    fn token_with_or_without_prefix_is_accepted() {
        assert!(check_bearer(Some("Bearer s3cret"), SECRET).is_ok());
        assert!(check_bearer(Some("  Bearer   s3cret  "), SECRET).is_ok());
        assert!(check_bearer(Some("s3cret"), SECRET).is_ok());
    }

    #[test]
    fn token_comparison_is_exact() {
        assert!(check_bearer(Some("Bearer S3CRET"), SECRET).is_err());
        assert!(check_bearer(Some("Bearer s3cret2"), SECRET).is_err());
    }
}
