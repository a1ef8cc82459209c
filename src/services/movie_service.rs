use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::database::entities::{actors, movie_actors, movies, ratings};
use crate::errors::{CatalogError, CatalogResult, ValidationError};
use crate::services::validation::{Validate, ValidationService};
use crate::services::views::{ActorSummary, MovieDetail, RatingSummary};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieInput {
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub genre: String,
    /// Ids of existing actors; unknown ids are ignored
    #[serde(default)]
    pub actor_ids: Option<Vec<i32>>,
}

impl Validate for CreateMovieInput {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationService::validate_required_text("title", &self.title)?;
        ValidationService::validate_required_text("description", &self.description)?;
        ValidationService::validate_release_year(self.release_year)?;
        ValidationService::validate_required_text("genre", &self.genre)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    /// Replaces the cast when non-empty; an empty list leaves it untouched
    #[serde(default)]
    pub actor_ids: Option<Vec<i32>>,
}

impl Validate for UpdateMovieInput {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            ValidationService::validate_required_text("title", title)?;
        }
        if let Some(description) = &self.description {
            ValidationService::validate_required_text("description", description)?;
        }
        if let Some(release_year) = self.release_year {
            ValidationService::validate_release_year(release_year)?;
        }
        if let Some(genre) = &self.genre {
            ValidationService::validate_required_text("genre", genre)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovieSearch {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Case-insensitive substring of the genre
    pub genre: Option<String>,
}

#[derive(Clone)]
pub struct MovieService {
    db: DatabaseConnection,
}

impl MovieService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateMovieInput) -> CatalogResult<MovieDetail> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let now = Utc::now();
        let movie = movies::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            release_year: Set(input.release_year),
            genre: Set(input.genre),
            average_rating: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if let Some(actor_ids) = non_empty(&input.actor_ids) {
            replace_cast(&txn, movie.id, actor_ids).await?;
        }

        let detail = load_detail(&txn, movie).await?;
        txn.commit().await?;

        info!("Created movie {} ({})", detail.id, detail.title);
        Ok(detail)
    }

    pub async fn find_all(&self) -> CatalogResult<Vec<MovieDetail>> {
        let movies = movies::Entity::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.db)
            .await?;

        Ok(load_details(&self.db, movies).await?)
    }

    pub async fn find_one(&self, id: i32) -> CatalogResult<MovieDetail> {
        let movie = find_movie(&self.db, id).await?;
        Ok(load_detail(&self.db, movie).await?)
    }

    /// Filters are ANDed; an absent or empty filter matches everything.
    pub async fn search(&self, search: MovieSearch) -> CatalogResult<Vec<MovieDetail>> {
        let mut query = movies::Entity::find();
        if let Some(title) = search.title.as_deref().filter(|term| !term.is_empty()) {
            query = query.filter(movies::Column::Title.contains(title));
        }
        if let Some(genre) = search.genre.as_deref().filter(|term| !term.is_empty()) {
            query = query.filter(movies::Column::Genre.contains(genre));
        }

        let movies = query
            .order_by_asc(movies::Column::Id)
            .all(&self.db)
            .await?;

        Ok(load_details(&self.db, movies).await?)
    }

    pub async fn update(&self, id: i32, input: UpdateMovieInput) -> CatalogResult<MovieDetail> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let movie = find_movie(&txn, id).await?;

        if let Some(actor_ids) = non_empty(&input.actor_ids) {
            replace_cast(&txn, movie.id, actor_ids).await?;
        }

        let mut active: movies::ActiveModel = movie.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(release_year) = input.release_year {
            active.release_year = Set(release_year);
        }
        if let Some(genre) = input.genre {
            active.genre = Set(genre);
        }
        active.updated_at = Set(Utc::now());

        let movie = active.update(&txn).await?;
        let detail = load_detail(&txn, movie).await?;
        txn.commit().await?;

        info!("Updated movie {}", id);
        Ok(detail)
    }

    /// Deletes the movie along with its ratings and cast links.
    pub async fn remove(&self, id: i32) -> CatalogResult<()> {
        let txn = self.db.begin().await?;
        find_movie(&txn, id).await?;

        ratings::Entity::delete_many()
            .filter(ratings::Column::MovieId.eq(id))
            .exec(&txn)
            .await?;
        movie_actors::Entity::delete_many()
            .filter(movie_actors::Column::MovieId.eq(id))
            .exec(&txn)
            .await?;
        movies::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        info!("Deleted movie {}", id);
        Ok(())
    }

    pub async fn get_actors_by_movie(&self, id: i32) -> CatalogResult<Vec<ActorSummary>> {
        let movie = find_movie(&self.db, id).await?;
        let actors = movie
            .find_related(actors::Entity)
            .order_by_asc(actors::Column::Id)
            .all(&self.db)
            .await?;

        Ok(actors.into_iter().map(ActorSummary::from).collect())
    }
}

fn non_empty(ids: &Option<Vec<i32>>) -> Option<&[i32]> {
    ids.as_deref().filter(|ids| !ids.is_empty())
}

async fn find_movie<C: ConnectionTrait>(db: &C, id: i32) -> CatalogResult<movies::Model> {
    movies::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| CatalogError::not_found("Movie", id))
}

/// Points the movie's cast at whichever of `actor_ids` exist.
async fn replace_cast<C: ConnectionTrait>(
    db: &C,
    movie_id: i32,
    actor_ids: &[i32],
) -> Result<usize, DbErr> {
    let actors = actors::Entity::find()
        .filter(actors::Column::Id.is_in(actor_ids.iter().copied()))
        .all(db)
        .await?;

    movie_actors::Entity::delete_many()
        .filter(movie_actors::Column::MovieId.eq(movie_id))
        .exec(db)
        .await?;

    if actors.is_empty() {
        return Ok(0);
    }

    let links = actors.iter().map(|actor| movie_actors::ActiveModel {
        movie_id: Set(movie_id),
        actor_id: Set(actor.id),
    });
    movie_actors::Entity::insert_many(links)
        .exec_without_returning(db)
        .await?;

    Ok(actors.len())
}

async fn load_detail<C: ConnectionTrait>(db: &C, movie: movies::Model) -> Result<MovieDetail, DbErr> {
    let actors = movie
        .find_related(actors::Entity)
        .order_by_asc(actors::Column::Id)
        .all(db)
        .await?;
    let ratings = movie
        .find_related(ratings::Entity)
        .order_by_asc(ratings::Column::Id)
        .all(db)
        .await?;

    Ok(MovieDetail::new(
        movie,
        actors.into_iter().map(ActorSummary::from).collect(),
        ratings.into_iter().map(RatingSummary::from).collect(),
    ))
}

/// Batch version of [`load_detail`]: one query per relation for the whole page.
async fn load_details<C: ConnectionTrait>(
    db: &C,
    movies: Vec<movies::Model>,
) -> Result<Vec<MovieDetail>, DbErr> {
    if movies.is_empty() {
        return Ok(Vec::new());
    }
    let movie_ids: Vec<i32> = movies.iter().map(|movie| movie.id).collect();

    let links = movie_actors::Entity::find()
        .filter(movie_actors::Column::MovieId.is_in(movie_ids.iter().copied()))
        .all(db)
        .await?;

    let mut actors_by_id: HashMap<i32, actors::Model> = HashMap::new();
    if !links.is_empty() {
        let actor_ids: Vec<i32> = links.iter().map(|link| link.actor_id).collect();
        for actor in actors::Entity::find()
            .filter(actors::Column::Id.is_in(actor_ids))
            .all(db)
            .await?
        {
            actors_by_id.insert(actor.id, actor);
        }
    }

    let mut cast: HashMap<i32, Vec<ActorSummary>> = HashMap::new();
    for link in links {
        if let Some(actor) = actors_by_id.get(&link.actor_id) {
            cast.entry(link.movie_id)
                .or_default()
                .push(ActorSummary::from(actor.clone()));
        }
    }
    for actors in cast.values_mut() {
        actors.sort_by_key(|actor| actor.id);
    }

    let mut reviews: HashMap<i32, Vec<RatingSummary>> = HashMap::new();
    for rating in ratings::Entity::find()
        .filter(ratings::Column::MovieId.is_in(movie_ids))
        .order_by_asc(ratings::Column::Id)
        .all(db)
        .await?
    {
        reviews
            .entry(rating.movie_id)
            .or_default()
            .push(RatingSummary::from(rating));
    }

    Ok(movies
        .into_iter()
        .map(|movie| {
            let actors = cast.remove(&movie.id).unwrap_or_default();
            let ratings = reviews.remove(&movie.id).unwrap_or_default();
            MovieDetail::new(movie, actors, ratings)
        })
        .collect())
}
