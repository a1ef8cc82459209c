use axum::{extract::State, http::StatusCode, response::Json};

use crate::errors::CatalogError;
use crate::server::app::AppState;
use crate::server::middleware::{RequireApiToken, ValidatedJson, ValidatedPath};
use crate::services::{CreateRatingInput, RatingResponse, RatingService, UpdateRatingInput};

#[utoipa::path(
    post,
    path = "/ratings",
    tag = "ratings",
    request_body = CreateRatingInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Rating created and movie average refreshed", body = RatingResponse),
        (status = 400, description = "Invalid input", body = crate::server::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::server::error::ErrorBody),
        (status = 404, description = "Movie not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn create_rating(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateRatingInput>,
) -> Result<(StatusCode, Json<RatingResponse>), CatalogError> {
    let rating = RatingService::new(state.db).create(input).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

#[utoipa::path(
    get,
    path = "/ratings",
    tag = "ratings",
    responses(
        (status = 200, description = "All ratings", body = [RatingResponse])
    )
)]
pub async fn list_ratings(
    State(state): State<AppState>,
) -> Result<Json<Vec<RatingResponse>>, CatalogError> {
    let ratings = RatingService::new(state.db).find_all().await?;
    Ok(Json(ratings))
}

#[utoipa::path(
    get,
    path = "/ratings/{id}",
    tag = "ratings",
    params(("id" = i32, Path, description = "Rating id")),
    responses(
        (status = 200, description = "Rating found", body = RatingResponse),
        (status = 404, description = "Rating not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn get_rating(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<RatingResponse>, CatalogError> {
    let rating = RatingService::new(state.db).find_one(id).await?;
    Ok(Json(rating))
}

#[utoipa::path(
    get,
    path = "/ratings/movie/{movieId}",
    tag = "ratings",
    params(("movieId" = i32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Ratings of the movie, empty for unknown movies", body = [RatingResponse])
    )
)]
pub async fn list_movie_ratings(
    State(state): State<AppState>,
    ValidatedPath(movie_id): ValidatedPath<i32>,
) -> Result<Json<Vec<RatingResponse>>, CatalogError> {
    let ratings = RatingService::new(state.db).find_by_movie(movie_id).await?;
    Ok(Json(ratings))
}

#[utoipa::path(
    patch,
    path = "/ratings/{id}",
    tag = "ratings",
    params(("id" = i32, Path, description = "Rating id")),
    request_body = UpdateRatingInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Rating updated and movie average refreshed", body = RatingResponse),
        (status = 400, description = "Invalid input", body = crate::server::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::server::error::ErrorBody),
        (status = 404, description = "Rating not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn update_rating(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(input): ValidatedJson<UpdateRatingInput>,
) -> Result<Json<RatingResponse>, CatalogError> {
    let rating = RatingService::new(state.db).update(id, input).await?;
    Ok(Json(rating))
}

#[utoipa::path(
    delete,
    path = "/ratings/{id}",
    tag = "ratings",
    params(("id" = i32, Path, description = "Rating id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Rating deleted and movie average refreshed"),
        (status = 401, description = "Missing or invalid token", body = crate::server::error::ErrorBody),
        (status = 404, description = "Rating not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn delete_rating(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<StatusCode, CatalogError> {
    RatingService::new(state.db).remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
