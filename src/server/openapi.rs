use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use super::error::ErrorBody;
use super::handlers::{actors, health, movies, ratings, seeds};
use crate::services::{
    ActorDetail, ActorSummary, CreateActorInput, CreateMovieInput, CreateRatingInput, MovieDetail,
    MovieSummary, RatingResponse, RatingSummary, UpdateActorInput, UpdateMovieInput,
    UpdateRatingInput,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Movie Catalog API", description = "Movies, actors and ratings"),
    paths(
        health::health_check,
        movies::create_movie,
        movies::list_movies,
        movies::search_movies,
        movies::get_movie,
        movies::get_movie_actors,
        movies::update_movie,
        movies::delete_movie,
        actors::create_actor,
        actors::list_actors,
        actors::search_actors,
        actors::get_actor,
        actors::get_actor_movies,
        actors::update_actor,
        actors::delete_actor,
        ratings::create_rating,
        ratings::list_ratings,
        ratings::get_rating,
        ratings::list_movie_ratings,
        ratings::update_rating,
        ratings::delete_rating,
        seeds::seed_database,
    ),
    components(schemas(
        MovieSummary,
        MovieDetail,
        ActorSummary,
        ActorDetail,
        RatingSummary,
        RatingResponse,
        CreateMovieInput,
        UpdateMovieInput,
        CreateActorInput,
        UpdateActorInput,
        CreateRatingInput,
        UpdateRatingInput,
        seeds::SeedResponse,
        ErrorBody,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "movies", description = "Movie catalog"),
        (name = "actors", description = "Actor registry"),
        (name = "ratings", description = "Ratings and movie averages"),
        (name = "seeds", description = "Sample data loader"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
