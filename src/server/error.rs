use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::errors::{AuthError, CatalogError, ValidationError};

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.into(),
            field: None,
        }
    }

    fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let mut body = ErrorBody::new(StatusCode::BAD_REQUEST, self.to_string());
        body.field = self.field;
        body.into_response_with(StatusCode::BAD_REQUEST)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ErrorBody::new(StatusCode::UNAUTHORIZED, self.to_string())
            .into_response_with(StatusCode::UNAUTHORIZED)
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            CatalogError::NotFound { .. } => ErrorBody::new(StatusCode::NOT_FOUND, self.to_string())
                .into_response_with(StatusCode::NOT_FOUND),
            CatalogError::Validation(err) => err.into_response(),
            CatalogError::Database(ref err) => {
                error!("{} while handling request: {}", self.error_code(), err);
                ErrorBody::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
