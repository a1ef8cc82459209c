//! Shapes returned by the services and rendered by the HTTP layer

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::database::entities::{actors, movies, ratings};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub genre: String,
    pub average_rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<movies::Model> for MovieSummary {
    fn from(movie: movies::Model) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            release_year: movie.release_year,
            genre: movie.genre,
            average_rating: movie.average_rating,
            created_at: movie.created_at,
            updated_at: movie.updated_at,
        }
    }
}

/// A movie with its cast and ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub genre: String,
    pub average_rating: f64,
    pub actors: Vec<ActorSummary>,
    pub ratings: Vec<RatingSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MovieDetail {
    pub fn new(movie: movies::Model, actors: Vec<ActorSummary>, ratings: Vec<RatingSummary>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            release_year: movie.release_year,
            genre: movie.genre,
            average_rating: movie.average_rating,
            actors,
            ratings,
            created_at: movie.created_at,
            updated_at: movie.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActorSummary {
    pub id: i32,
    pub name: String,
    pub biography: String,
    pub birth_date: NaiveDate,
    pub nationality: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<actors::Model> for ActorSummary {
    fn from(actor: actors::Model) -> Self {
        Self {
            id: actor.id,
            name: actor.name,
            biography: actor.biography,
            birth_date: actor.birth_date,
            nationality: actor.nationality,
            created_at: actor.created_at,
            updated_at: actor.updated_at,
        }
    }
}

/// An actor with the movies they appear in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActorDetail {
    pub id: i32,
    pub name: String,
    pub biography: String,
    pub birth_date: NaiveDate,
    pub nationality: String,
    pub movies: Vec<MovieSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActorDetail {
    pub fn new(actor: actors::Model, movies: Vec<MovieSummary>) -> Self {
        Self {
            id: actor.id,
            name: actor.name,
            biography: actor.biography,
            birth_date: actor.birth_date,
            nationality: actor.nationality,
            movies,
            created_at: actor.created_at,
            updated_at: actor.updated_at,
        }
    }
}

/// Rating as embedded in a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub id: i32,
    pub score: f64,
    pub comment: String,
    pub reviewer_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ratings::Model> for RatingSummary {
    fn from(rating: ratings::Model) -> Self {
        Self {
            id: rating.id,
            score: rating.score,
            comment: rating.comment,
            reviewer_name: rating.reviewer_name,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}

/// Rating flattened with the few movie fields the front end lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub id: i32,
    pub score: f64,
    pub comment: String,
    pub reviewer_name: String,
    pub movie_id: i32,
    pub movie_title: String,
    pub movie_release_year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RatingResponse {
    pub fn new(rating: ratings::Model, movie: &movies::Model) -> Self {
        Self {
            id: rating.id,
            score: rating.score,
            comment: rating.comment,
            reviewer_name: rating.reviewer_name,
            movie_id: movie.id,
            movie_title: movie.title.clone(),
            movie_release_year: movie.release_year,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_movie() -> movies::Model {
        let now = Utc::now();
        movies::Model {
            id: 3,
            title: "Titanic".to_string(),
            description: "Ill-fated voyage".to_string(),
            release_year: 1997,
            genre: "Romance".to_string(),
            average_rating: 5.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn rating_response_flattens_movie_fields() {
        let movie = sample_movie();
        let rating = ratings::Model {
            id: 11,
            score: 4.5,
            comment: "Epic".to_string(),
            reviewer_name: "RomanceFan".to_string(),
            movie_id: movie.id,
            created_at: movie.created_at,
            updated_at: movie.updated_at,
        };

        let value = serde_json::to_value(RatingResponse::new(rating, &movie)).unwrap();
        assert_eq!(value["movieId"], json!(3));
        assert_eq!(value["movieTitle"], json!("Titanic"));
        assert_eq!(value["movieReleaseYear"], json!(1997));
        assert_eq!(value["reviewerName"], json!("RomanceFan"));
        assert!(value.get("movie").is_none());
    }

    #[test]
    fn movie_detail_uses_camel_case_keys() {
        let value = serde_json::to_value(MovieDetail::new(sample_movie(), vec![], vec![])).unwrap();
        assert_eq!(value["releaseYear"], json!(1997));
        assert_eq!(value["averageRating"].as_f64(), Some(5.0));
        assert!(value["actors"].as_array().unwrap().is_empty());
        assert!(value["ratings"].as_array().unwrap().is_empty());
    }
}
