use chrono::{NaiveDate, Utc};
use sea_orm::*;
use tracing::info;

use crate::database::entities::{actors, movie_actors, movies, ratings};

/// Counts of the rows written by a seed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub actors: usize,
    pub movies: usize,
    pub ratings: usize,
}

const SAMPLE_ACTORS: [(&str, &str, (i32, u32, u32), &str); 5] = [
    (
        "Tom Hanks",
        "American actor and filmmaker known for both his comedic and dramatic roles.",
        (1956, 7, 9),
        "American",
    ),
    (
        "Leonardo DiCaprio",
        "American actor, film producer, and environmentalist.",
        (1974, 11, 11),
        "American",
    ),
    (
        "Meryl Streep",
        "American actress often described as the best actress of her generation.",
        (1949, 6, 22),
        "American",
    ),
    (
        "Brad Pitt",
        "American actor and film producer.",
        (1963, 12, 18),
        "American",
    ),
    (
        "Emma Watson",
        "English actress, model, and activist.",
        (1990, 4, 15),
        "British",
    ),
];

// (title, description, release year, genre); movie i stars actor i
const SAMPLE_MOVIES: [(&str, &str, i32, &str); 5] = [
    (
        "Forrest Gump",
        "The presidencies of Kennedy and Johnson, the Vietnam War, the Watergate scandal and other historical events unfold from the perspective of an Alabama man with an IQ of 75.",
        1994,
        "Drama",
    ),
    (
        "Titanic",
        "A seventeen-year-old aristocrat falls in love with a kind but poor artist aboard the luxurious, ill-fated R.M.S. Titanic.",
        1997,
        "Romance",
    ),
    (
        "The Devil Wears Prada",
        "A smart but sensible new graduate lands a job as an assistant to Miranda Priestly, the demanding editor-in-chief of a high fashion magazine.",
        2006,
        "Comedy",
    ),
    (
        "Fight Club",
        "An insomniac office worker and a devil-may-care soapmaker form an underground fight club that evolves into something much, much more.",
        1999,
        "Drama",
    ),
    (
        "Harry Potter and the Sorcerer's Stone",
        "An orphaned boy enrolls in a school of wizardry, where he learns the truth about himself, his family and the terrible evil that haunts the magical world.",
        2001,
        "Fantasy",
    ),
];

// (score, comment, reviewer, index into SAMPLE_MOVIES)
const SAMPLE_RATINGS: [(f64, &str, &str, usize); 6] = [
    (4.5, "Amazing performance by Tom Hanks!", "MovieFan1", 0),
    (4.0, "Great story and acting.", "CinemaLover", 0),
    (5.0, "Epic love story!", "RomanceFan", 1),
    (4.5, "Meryl Streep is brilliant!", "DramaQueen", 2),
    (4.8, "Mind-blowing plot twist!", "ThrillerGuy", 3),
    (4.2, "Magical adventure for all ages.", "FantasyLover", 4),
];

/// Removes every rating, cast link, movie and actor, children first.
pub async fn clear_catalog<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    info!("Clearing existing catalog data");

    ratings::Entity::delete_many().exec(db).await?;
    movie_actors::Entity::delete_many().exec(db).await?;
    movies::Entity::delete_many().exec(db).await?;
    actors::Entity::delete_many().exec(db).await?;

    Ok(())
}

/// Inserts the sample catalog and returns the ids of the seeded movies.
///
/// Average ratings are left at zero; callers recompute them once the
/// ratings are in place.
pub async fn insert_sample_catalog<C: ConnectionTrait>(
    db: &C,
) -> Result<(Vec<i32>, SeedSummary), DbErr> {
    let actor_ids = create_sample_actors(db).await?;
    let movie_ids = create_sample_movies(db, &actor_ids).await?;
    let rating_count = create_sample_ratings(db, &movie_ids).await?;

    let summary = SeedSummary {
        actors: actor_ids.len(),
        movies: movie_ids.len(),
        ratings: rating_count,
    };
    info!(
        "Seeded {} actors, {} movies and {} ratings",
        summary.actors, summary.movies, summary.ratings
    );

    Ok((movie_ids, summary))
}

async fn create_sample_actors<C: ConnectionTrait>(db: &C) -> Result<Vec<i32>, DbErr> {
    info!("Creating sample actors...");

    let now = Utc::now();
    let mut ids = Vec::with_capacity(SAMPLE_ACTORS.len());
    for (name, biography, (year, month, day), nationality) in SAMPLE_ACTORS {
        let birth_date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DbErr::Custom(format!("invalid sample birth date for {}", name)))?;

        let actor = actors::ActiveModel {
            name: Set(name.to_string()),
            biography: Set(biography.to_string()),
            birth_date: Set(birth_date),
            nationality: Set(nationality.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
        ids.push(actor.id);
    }

    Ok(ids)
}

async fn create_sample_movies<C: ConnectionTrait>(
    db: &C,
    actor_ids: &[i32],
) -> Result<Vec<i32>, DbErr> {
    info!("Creating sample movies...");

    let now = Utc::now();
    let mut ids = Vec::with_capacity(SAMPLE_MOVIES.len());
    for ((title, description, release_year, genre), actor_id) in
        SAMPLE_MOVIES.into_iter().zip(actor_ids.iter().copied())
    {
        let movie = movies::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            release_year: Set(release_year),
            genre: Set(genre.to_string()),
            average_rating: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        movie_actors::Entity::insert(movie_actors::ActiveModel {
            movie_id: Set(movie.id),
            actor_id: Set(actor_id),
        })
        .exec_without_returning(db)
        .await?;

        ids.push(movie.id);
    }

    Ok(ids)
}

async fn create_sample_ratings<C: ConnectionTrait>(
    db: &C,
    movie_ids: &[i32],
) -> Result<usize, DbErr> {
    info!("Creating sample ratings...");

    let now = Utc::now();
    let mut models = Vec::with_capacity(SAMPLE_RATINGS.len());
    for (score, comment, reviewer_name, movie_index) in SAMPLE_RATINGS {
        let Some(movie_id) = movie_ids.get(movie_index).copied() else {
            continue;
        };
        models.push(ratings::ActiveModel {
            score: Set(score),
            comment: Set(comment.to_string()),
            reviewer_name: Set(reviewer_name.to_string()),
            movie_id: Set(movie_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });
    }

    let count = models.len();
    if count > 0 {
        ratings::Entity::insert_many(models)
            .exec_without_returning(db)
            .await?;
    }

    Ok(count)
}
