use thiserror::Error;

/// Failures of the shared-secret bearer check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header on a mutating request
    #[error("Authorization header is required")]
    MissingHeader,

    /// Header present but the token does not match the configured secret
    #[error("Invalid API token")]
    InvalidToken,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "AUTH_HEADER_REQUIRED",
            AuthError::InvalidToken => "INVALID_TOKEN",
        }
    }
}
