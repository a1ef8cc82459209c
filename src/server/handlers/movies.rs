use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};

use crate::errors::CatalogError;
use crate::server::app::AppState;
use crate::server::middleware::{RequireApiToken, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::services::{
    ActorSummary, CreateMovieInput, MovieDetail, MovieSearch, MovieService, UpdateMovieInput,
};

#[utoipa::path(
    post,
    path = "/movies",
    tag = "movies",
    request_body = CreateMovieInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Movie created", body = MovieDetail),
        (status = 400, description = "Invalid input", body = crate::server::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::server::error::ErrorBody)
    )
)]
pub async fn create_movie(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateMovieInput>,
) -> Result<(StatusCode, Json<MovieDetail>), CatalogError> {
    let movie = MovieService::new(state.db).create(input).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

#[utoipa::path(
    get,
    path = "/movies",
    tag = "movies",
    responses(
        (status = 200, description = "All movies with cast and ratings", body = [MovieDetail])
    )
)]
pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieDetail>>, CatalogError> {
    let movies = MovieService::new(state.db).find_all().await?;
    Ok(Json(movies))
}

#[utoipa::path(
    get,
    path = "/movies/search",
    tag = "movies",
    params(MovieSearch),
    responses(
        (status = 200, description = "Movies matching every given filter", body = [MovieDetail])
    )
)]
pub async fn search_movies(
    State(state): State<AppState>,
    ValidatedQuery(search): ValidatedQuery<MovieSearch>,
) -> Result<Json<Vec<MovieDetail>>, CatalogError> {
    let movies = MovieService::new(state.db).search(search).await?;
    Ok(Json(movies))
}

#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie found", body = MovieDetail),
        (status = 404, description = "Movie not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<MovieDetail>, CatalogError> {
    let movie = MovieService::new(state.db).find_one(id).await?;
    Ok(Json(movie))
}

#[utoipa::path(
    get,
    path = "/movies/{id}/actors",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Cast of the movie", body = [ActorSummary]),
        (status = 404, description = "Movie not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn get_movie_actors(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<Vec<ActorSummary>>, CatalogError> {
    let actors = MovieService::new(state.db).get_actors_by_movie(id).await?;
    Ok(Json(actors))
}

#[utoipa::path(
    patch,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie id")),
    request_body = UpdateMovieInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Movie updated", body = MovieDetail),
        (status = 400, description = "Invalid input", body = crate::server::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::server::error::ErrorBody),
        (status = 404, description = "Movie not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn update_movie(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(input): ValidatedJson<UpdateMovieInput>,
) -> Result<Json<MovieDetail>, CatalogError> {
    let movie = MovieService::new(state.db).update(id, input).await?;
    Ok(Json(movie))
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Movie and its ratings deleted"),
        (status = 401, description = "Missing or invalid token", body = crate::server::error::ErrorBody),
        (status = 404, description = "Movie not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn delete_movie(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<StatusCode, CatalogError> {
    MovieService::new(state.db).remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
