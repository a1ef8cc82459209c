use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};

use crate::errors::CatalogError;
use crate::server::app::AppState;
use crate::server::middleware::{RequireApiToken, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::services::{ActorDetail, ActorSearch, ActorService, CreateActorInput, UpdateActorInput};

#[utoipa::path(
    post,
    path = "/actors",
    tag = "actors",
    request_body = CreateActorInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Actor created", body = ActorDetail),
        (status = 400, description = "Invalid input", body = crate::server::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::server::error::ErrorBody)
    )
)]
pub async fn create_actor(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateActorInput>,
) -> Result<(StatusCode, Json<ActorDetail>), CatalogError> {
    let actor = ActorService::new(state.db).create(input).await?;
    Ok((StatusCode::CREATED, Json(actor)))
}

#[utoipa::path(
    get,
    path = "/actors",
    tag = "actors",
    responses(
        (status = 200, description = "All actors with their movies", body = [ActorDetail])
    )
)]
pub async fn list_actors(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActorDetail>>, CatalogError> {
    let actors = ActorService::new(state.db).find_all().await?;
    Ok(Json(actors))
}

#[utoipa::path(
    get,
    path = "/actors/search",
    tag = "actors",
    params(ActorSearch),
    responses(
        (status = 200, description = "Actors matching every given filter", body = [ActorDetail])
    )
)]
pub async fn search_actors(
    State(state): State<AppState>,
    ValidatedQuery(search): ValidatedQuery<ActorSearch>,
) -> Result<Json<Vec<ActorDetail>>, CatalogError> {
    let actors = ActorService::new(state.db).search(search).await?;
    Ok(Json(actors))
}

#[utoipa::path(
    get,
    path = "/actors/{id}",
    tag = "actors",
    params(("id" = i32, Path, description = "Actor id")),
    responses(
        (status = 200, description = "Actor found", body = ActorDetail),
        (status = 404, description = "Actor not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn get_actor(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<ActorDetail>, CatalogError> {
    let actor = ActorService::new(state.db).find_one(id).await?;
    Ok(Json(actor))
}

#[utoipa::path(
    get,
    path = "/actors/{id}/movies",
    tag = "actors",
    params(("id" = i32, Path, description = "Actor id")),
    responses(
        (status = 200, description = "Actor with the movies they appear in", body = ActorDetail),
        (status = 404, description = "Actor not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn get_actor_movies(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<ActorDetail>, CatalogError> {
    let actor = ActorService::new(state.db).get_movies_by_actor(id).await?;
    Ok(Json(actor))
}

#[utoipa::path(
    patch,
    path = "/actors/{id}",
    tag = "actors",
    params(("id" = i32, Path, description = "Actor id")),
    request_body = UpdateActorInput,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Actor updated", body = ActorDetail),
        (status = 400, description = "Invalid input", body = crate::server::error::ErrorBody),
        (status = 401, description = "Missing or invalid token", body = crate::server::error::ErrorBody),
        (status = 404, description = "Actor not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn update_actor(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(input): ValidatedJson<UpdateActorInput>,
) -> Result<Json<ActorDetail>, CatalogError> {
    let actor = ActorService::new(state.db).update(id, input).await?;
    Ok(Json(actor))
}

#[utoipa::path(
    delete,
    path = "/actors/{id}",
    tag = "actors",
    params(("id" = i32, Path, description = "Actor id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Actor deleted"),
        (status = 401, description = "Missing or invalid token", body = crate::server::error::ErrorBody),
        (status = 404, description = "Actor not found", body = crate::server::error::ErrorBody)
    )
)]
pub async fn delete_actor(
    _auth: RequireApiToken,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<StatusCode, CatalogError> {
    ActorService::new(state.db).remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
