use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::CatalogError;
use crate::server::app::AppState;
use crate::server::middleware::RequireApiToken;
use crate::services::SeedService;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedResponse {
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/seeds",
    tag = "seeds",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Catalog replaced with the sample data", body = SeedResponse),
        (status = 401, description = "Missing or invalid token", body = crate::server::error::ErrorBody)
    )
)]
pub async fn seed_database(
    _auth: RequireApiToken,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SeedResponse>), CatalogError> {
    SeedService::new(state.db).seed().await?;

    Ok((
        StatusCode::CREATED,
        Json(SeedResponse {
            message: "Database seeded successfully!".to_string(),
        }),
    ))
}
