use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::database::entities::{actors, movie_actors, movies};
use crate::errors::{CatalogError, CatalogResult, ValidationError};
use crate::services::validation::{Validate, ValidationService};
use crate::services::views::{ActorDetail, MovieSummary};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActorInput {
    pub name: String,
    pub biography: String,
    /// `YYYY-MM-DD` or a full ISO 8601 timestamp
    pub birth_date: String,
    pub nationality: String,
}

impl Validate for CreateActorInput {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationService::validate_required_text("name", &self.name)?;
        ValidationService::validate_required_text("biography", &self.biography)?;
        ValidationService::parse_birth_date(&self.birth_date)?;
        ValidationService::validate_required_text("nationality", &self.nationality)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActorInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl Validate for UpdateActorInput {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            ValidationService::validate_required_text("name", name)?;
        }
        if let Some(biography) = &self.biography {
            ValidationService::validate_required_text("biography", biography)?;
        }
        if let Some(birth_date) = &self.birth_date {
            ValidationService::parse_birth_date(birth_date)?;
        }
        if let Some(nationality) = &self.nationality {
            ValidationService::validate_required_text("nationality", nationality)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActorSearch {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the nationality
    pub nationality: Option<String>,
}

#[derive(Clone)]
pub struct ActorService {
    db: DatabaseConnection,
}

impl ActorService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateActorInput) -> CatalogResult<ActorDetail> {
        input.validate()?;
        let birth_date = ValidationService::parse_birth_date(&input.birth_date)?;

        let now = Utc::now();
        let actor = actors::ActiveModel {
            name: Set(input.name),
            biography: Set(input.biography),
            birth_date: Set(birth_date),
            nationality: Set(input.nationality),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Created actor {} ({})", actor.id, actor.name);
        Ok(ActorDetail::new(actor, Vec::new()))
    }

    pub async fn find_all(&self) -> CatalogResult<Vec<ActorDetail>> {
        let actors = actors::Entity::find()
            .order_by_asc(actors::Column::Id)
            .all(&self.db)
            .await?;

        Ok(load_details(&self.db, actors).await?)
    }

    pub async fn find_one(&self, id: i32) -> CatalogResult<ActorDetail> {
        let actor = find_actor(&self.db, id).await?;
        Ok(load_detail(&self.db, actor).await?)
    }

    /// Filters are ANDed; an absent or empty filter matches everything.
    pub async fn search(&self, search: ActorSearch) -> CatalogResult<Vec<ActorDetail>> {
        let mut query = actors::Entity::find();
        if let Some(name) = search.name.as_deref().filter(|term| !term.is_empty()) {
            query = query.filter(actors::Column::Name.contains(name));
        }
        if let Some(nationality) = search.nationality.as_deref().filter(|term| !term.is_empty()) {
            query = query.filter(actors::Column::Nationality.contains(nationality));
        }

        let actors = query
            .order_by_asc(actors::Column::Id)
            .all(&self.db)
            .await?;

        Ok(load_details(&self.db, actors).await?)
    }

    pub async fn update(&self, id: i32, input: UpdateActorInput) -> CatalogResult<ActorDetail> {
        input.validate()?;

        let actor = find_actor(&self.db, id).await?;
        let mut active: actors::ActiveModel = actor.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(biography) = input.biography {
            active.biography = Set(biography);
        }
        if let Some(birth_date) = input.birth_date {
            active.birth_date = Set(ValidationService::parse_birth_date(&birth_date)?);
        }
        if let Some(nationality) = input.nationality {
            active.nationality = Set(nationality);
        }
        active.updated_at = Set(Utc::now());

        let actor = active.update(&self.db).await?;

        info!("Updated actor {}", id);
        Ok(load_detail(&self.db, actor).await?)
    }

    /// Deletes the actor and its cast links; the movies themselves stay.
    pub async fn remove(&self, id: i32) -> CatalogResult<()> {
        let txn = self.db.begin().await?;
        find_actor(&txn, id).await?;

        movie_actors::Entity::delete_many()
            .filter(movie_actors::Column::ActorId.eq(id))
            .exec(&txn)
            .await?;
        actors::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        info!("Deleted actor {}", id);
        Ok(())
    }

    /// The actor together with the movies they appear in.
    pub async fn get_movies_by_actor(&self, id: i32) -> CatalogResult<ActorDetail> {
        self.find_one(id).await
    }
}

async fn find_actor<C: ConnectionTrait>(db: &C, id: i32) -> CatalogResult<actors::Model> {
    actors::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| CatalogError::not_found("Actor", id))
}

async fn load_detail<C: ConnectionTrait>(db: &C, actor: actors::Model) -> Result<ActorDetail, DbErr> {
    let movies = actor
        .find_related(movies::Entity)
        .order_by_asc(movies::Column::Id)
        .all(db)
        .await?;

    Ok(ActorDetail::new(
        actor,
        movies.into_iter().map(MovieSummary::from).collect(),
    ))
}

async fn load_details<C: ConnectionTrait>(
    db: &C,
    actors: Vec<actors::Model>,
) -> Result<Vec<ActorDetail>, DbErr> {
    if actors.is_empty() {
        return Ok(Vec::new());
    }
    let actor_ids: Vec<i32> = actors.iter().map(|actor| actor.id).collect();

    let links = movie_actors::Entity::find()
        .filter(movie_actors::Column::ActorId.is_in(actor_ids))
        .all(db)
        .await?;

    let mut movies_by_id: HashMap<i32, movies::Model> = HashMap::new();
    if !links.is_empty() {
        let movie_ids: Vec<i32> = links.iter().map(|link| link.movie_id).collect();
        for movie in movies::Entity::find()
            .filter(movies::Column::Id.is_in(movie_ids))
            .all(db)
            .await?
        {
            movies_by_id.insert(movie.id, movie);
        }
    }

    let mut filmography: HashMap<i32, Vec<MovieSummary>> = HashMap::new();
    for link in links {
        if let Some(movie) = movies_by_id.get(&link.movie_id) {
            filmography
                .entry(link.actor_id)
                .or_default()
                .push(MovieSummary::from(movie.clone()));
        }
    }
    for movies in filmography.values_mut() {
        movies.sort_by_key(|movie| movie.id);
    }

    Ok(actors
        .into_iter()
        .map(|actor| {
            let movies = filmography.remove(&actor.id).unwrap_or_default();
            ActorDetail::new(actor, movies)
        })
        .collect())
}
