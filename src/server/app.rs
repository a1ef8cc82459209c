use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::HeaderValue,
    response::Json,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use super::handlers::{actors, health, movies, ratings, seeds};
use super::openapi::ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Shared secret expected in `Authorization: Bearer <secret>`
    pub api_secret: Arc<str>,
}

pub async fn create_app(
    db: DatabaseConnection,
    cors_origin: Option<&str>,
    api_secret: &str,
) -> Result<Router> {
    let state = AppState {
        db,
        api_secret: Arc::from(api_secret),
    };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(catalog_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state);

    Ok(app)
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        // Movie routes
        .route("/movies", get(movies::list_movies).post(movies::create_movie))
        .route("/movies/search", get(movies::search_movies))
        .route(
            "/movies/:id",
            get(movies::get_movie)
                .patch(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/movies/:id/actors", get(movies::get_movie_actors))
        // Actor routes
        .route("/actors", get(actors::list_actors).post(actors::create_actor))
        .route("/actors/search", get(actors::search_actors))
        .route(
            "/actors/:id",
            get(actors::get_actor)
                .patch(actors::update_actor)
                .delete(actors::delete_actor),
        )
        .route("/actors/:id/movies", get(actors::get_actor_movies))
        // Rating routes
        .route("/ratings", get(ratings::list_ratings).post(ratings::create_rating))
        .route(
            "/ratings/:id",
            get(ratings::get_rating)
                .patch(ratings::update_rating)
                .delete(ratings::delete_rating),
        )
        .route("/ratings/movie/:movie_id", get(ratings::list_movie_ratings))
        // Bulk loader
        .route("/seeds", post(seeds::seed_database))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
