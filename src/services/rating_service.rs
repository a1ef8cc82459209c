use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::database::entities::{movies, ratings};
use crate::errors::{CatalogError, CatalogResult, ValidationError};
use crate::services::validation::{Validate, ValidationService};
use crate::services::views::RatingResponse;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingInput {
    /// Between 0.5 and 5.0; stored with one decimal
    pub score: f64,
    pub comment: String,
    pub reviewer_name: String,
    pub movie_id: i32,
}

impl Validate for CreateRatingInput {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationService::validate_score(self.score)
    }
}

/// Full replacement of a rating's content; the movie cannot change.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatingInput {
    pub score: f64,
    pub comment: String,
    pub reviewer_name: String,
}

impl Validate for UpdateRatingInput {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationService::validate_score(self.score)
    }
}

/// Rounds half away from zero to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of the scores rounded to one decimal, or 0 when there are none.
pub fn average_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    round_to_tenth(mean)
}

/// Writes the current average of a movie's ratings back onto the movie.
///
/// Runs on whatever connection it is given so callers can keep it inside
/// the transaction that changed the ratings.
pub async fn recompute_average<C: ConnectionTrait>(db: &C, movie_id: i32) -> Result<f64, DbErr> {
    let scores: Vec<f64> = ratings::Entity::find()
        .filter(ratings::Column::MovieId.eq(movie_id))
        .all(db)
        .await?
        .into_iter()
        .map(|rating| rating.score)
        .collect();
    let average = average_score(&scores);

    movies::Entity::update_many()
        .col_expr(movies::Column::AverageRating, Expr::value(average))
        .filter(movies::Column::Id.eq(movie_id))
        .exec(db)
        .await?;

    debug!(
        "Movie {} average rating is now {} over {} ratings",
        movie_id,
        average,
        scores.len()
    );
    Ok(average)
}

#[derive(Clone)]
pub struct RatingService {
    db: DatabaseConnection,
}

impl RatingService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateRatingInput) -> CatalogResult<RatingResponse> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let movie = movies::Entity::find_by_id(input.movie_id)
            .one(&txn)
            .await?
            .ok_or_else(|| CatalogError::not_found("Movie", input.movie_id))?;

        let now = Utc::now();
        let rating = ratings::ActiveModel {
            score: Set(round_to_tenth(input.score)),
            comment: Set(input.comment),
            reviewer_name: Set(input.reviewer_name),
            movie_id: Set(movie.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        recompute_average(&txn, movie.id).await?;
        txn.commit().await?;

        info!("Created rating {} for movie {}", rating.id, movie.id);
        Ok(RatingResponse::new(rating, &movie))
    }

    pub async fn find_all(&self) -> CatalogResult<Vec<RatingResponse>> {
        let rows = ratings::Entity::find()
            .find_also_related(movies::Entity)
            .order_by_asc(ratings::Column::Id)
            .all(&self.db)
            .await?;

        Ok(to_responses(rows))
    }

    pub async fn find_one(&self, id: i32) -> CatalogResult<RatingResponse> {
        let (rating, movie) = find_rating(&self.db, id).await?;
        Ok(RatingResponse::new(rating, &movie))
    }

    /// Ratings of one movie; unknown movies simply have none.
    pub async fn find_by_movie(&self, movie_id: i32) -> CatalogResult<Vec<RatingResponse>> {
        let rows = ratings::Entity::find()
            .filter(ratings::Column::MovieId.eq(movie_id))
            .find_also_related(movies::Entity)
            .order_by_asc(ratings::Column::Id)
            .all(&self.db)
            .await?;

        Ok(to_responses(rows))
    }

    pub async fn update(&self, id: i32, input: UpdateRatingInput) -> CatalogResult<RatingResponse> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let (rating, movie) = find_rating(&txn, id).await?;

        let mut active: ratings::ActiveModel = rating.into();
        active.score = Set(round_to_tenth(input.score));
        active.comment = Set(input.comment);
        active.reviewer_name = Set(input.reviewer_name);
        active.updated_at = Set(Utc::now());
        let rating = active.update(&txn).await?;

        recompute_average(&txn, movie.id).await?;
        txn.commit().await?;

        info!("Updated rating {}", id);
        Ok(RatingResponse::new(rating, &movie))
    }

    pub async fn remove(&self, id: i32) -> CatalogResult<()> {
        let txn = self.db.begin().await?;
        let (rating, movie) = find_rating(&txn, id).await?;

        ratings::Entity::delete_by_id(rating.id).exec(&txn).await?;
        recompute_average(&txn, movie.id).await?;
        txn.commit().await?;

        info!("Deleted rating {} from movie {}", id, movie.id);
        Ok(())
    }

    /// Recomputes and stores the movie's average, returning the new value.
    pub async fn recompute_average(&self, movie_id: i32) -> CatalogResult<f64> {
        let txn = self.db.begin().await?;
        movies::Entity::find_by_id(movie_id)
            .one(&txn)
            .await?
            .ok_or_else(|| CatalogError::not_found("Movie", movie_id))?;

        let average = recompute_average(&txn, movie_id).await?;
        txn.commit().await?;

        Ok(average)
    }
}

async fn find_rating<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> CatalogResult<(ratings::Model, movies::Model)> {
    match ratings::Entity::find_by_id(id)
        .find_also_related(movies::Entity)
        .one(db)
        .await?
    {
        Some((rating, Some(movie))) => Ok((rating, movie)),
        _ => Err(CatalogError::not_found("Rating", id)),
    }
}

fn to_responses(rows: Vec<(ratings::Model, Option<movies::Model>)>) -> Vec<RatingResponse> {
    rows.into_iter()
        .filter_map(|(rating, movie)| movie.map(|movie| RatingResponse::new(rating, &movie)))
        .collect()
}
