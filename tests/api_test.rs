//! API integration tests
//!
//! Drives the REST endpoints end to end against a temporary SQLite file

use anyhow::Result;
use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::TestServer;
use movie_catalog::database::{establish_connection, get_database_url, setup_database};
use movie_catalog::server::app::create_app;
use serde_json::{json, Value};
use tempfile::TempDir;

const SECRET: &str = "test-secret";

/// Create a test server backed by a fresh database file
async fn setup_test_server() -> Result<(TestServer, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("catalog.db");
    let db = establish_connection(&get_database_url(db_path.to_str())).await?;
    setup_database(&db).await?;

    let app = create_app(db, Some("*"), SECRET).await?;
    let server = TestServer::new(app)?;

    Ok((server, temp_dir))
}

fn bearer() -> HeaderValue {
    HeaderValue::from_static("Bearer test-secret")
}

async fn create_movie(server: &TestServer, title: &str, genre: &str) -> i64 {
    let response = server
        .post("/movies")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({
            "title": title,
            "description": format!("About {}", title),
            "releaseYear": 2000,
            "genre": genre
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

async fn create_actor(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/actors")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({
            "name": name,
            "biography": "Performer",
            "birthDate": "1970-01-01",
            "nationality": "American"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

async fn create_rating(server: &TestServer, movie_id: i64, score: f64) -> i64 {
    let response = server
        .post("/ratings")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({
            "score": score,
            "comment": "",
            "reviewerName": "Critic",
            "movieId": movie_id
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

async fn average_rating(server: &TestServer, movie_id: i64) -> f64 {
    let response = server.get(&format!("/movies/{}", movie_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()["averageRating"].as_f64().unwrap()
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "movie-catalog");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_openapi_document() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;

    let response = server.get("/api-docs/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let doc: Value = response.json();
    assert!(doc["paths"]["/movies"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());

    Ok(())
}

#[tokio::test]
async fn test_mutations_require_token() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;
    let payload = json!({
        "title": "Heat",
        "description": "A heist thriller",
        "releaseYear": 1995,
        "genre": "Crime"
    });

    let response = server.post("/movies").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["statusCode"], 401);
    assert_eq!(body["message"], "Authorization header is required");

    let response = server
        .post("/movies")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer wrong"))
        .json(&payload)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid API token");

    let response = server
        .post("/movies")
        .add_header(AUTHORIZATION, HeaderValue::from_static("  Bearer test-secret  "))
        .json(&payload)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    // Reads stay open
    let response = server.get("/movies").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.post("/seeds").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_movies_crud_api() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;
    let actor_id = create_actor(&server, "Al Pacino").await;

    let response = server
        .post("/movies")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({
            "title": "Heat",
            "description": "A heist thriller",
            "releaseYear": 1995,
            "genre": "Crime",
            "actorIds": [actor_id, 424242]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let movie: Value = response.json();
    let movie_id = movie["id"].as_i64().unwrap();
    assert_eq!(movie["title"], "Heat");
    assert_eq!(movie["releaseYear"], 1995);
    assert_eq!(movie["averageRating"].as_f64(), Some(0.0));
    assert_eq!(movie["actors"].as_array().unwrap().len(), 1);
    assert_eq!(movie["actors"][0]["id"], actor_id);
    assert!(movie["ratings"].as_array().unwrap().is_empty());

    let response = server.get("/movies").await;
    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["id"], movie_id);

    let response = server
        .patch(&format!("/movies/{}", movie_id))
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "genre": "Thriller" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["genre"], "Thriller");
    assert_eq!(updated["title"], "Heat");
    assert_eq!(updated["actors"].as_array().unwrap().len(), 1);

    let response = server.get(&format!("/movies/{}/actors", movie_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let actors: Vec<Value> = response.json();
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0]["name"], "Al Pacino");

    let response = server
        .delete(&format!("/movies/{}", movie_id))
        .add_header(AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&format!("/movies/{}", movie_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], format!("Movie with ID {} not found", movie_id));

    Ok(())
}

#[tokio::test]
async fn test_movie_validation_errors() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;

    let response = server
        .post("/movies")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({
            "title": "Too Early",
            "description": "Before cinema",
            "releaseYear": 1700,
            "genre": "Drama"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["field"], "releaseYear");

    // Missing required field
    let response = server
        .post("/movies")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "title": "No Year", "description": "d", "genre": "Drama" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/movies")
        .add_header(AUTHORIZATION, bearer())
        .text("{not json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.get("/movies/abc").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.get("/movies").await;
    let movies: Vec<Value> = response.json();
    assert!(movies.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_movie_search() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;
    create_movie(&server, "The Matrix", "Sci-Fi").await;
    create_movie(&server, "Matrix Reloaded", "Sci-Fi").await;
    create_movie(&server, "Notting Hill", "Romance").await;

    let response = server.get("/movies/search?title=matrix").await;
    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), 2);

    let response = server.get("/movies/search?title=matrix&genre=romance").await;
    let movies: Vec<Value> = response.json();
    assert!(movies.is_empty());

    let response = server.get("/movies/search?genre=").await;
    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), 3);

    let all: Vec<Value> = server.get("/movies").await.json();
    let unfiltered: Vec<Value> = server.get("/movies/search").await.json();
    assert_eq!(all, unfiltered);

    Ok(())
}

#[tokio::test]
async fn test_actor_search() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;
    create_actor(&server, "Tom Hanks").await;
    let response = server
        .post("/actors")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({
            "name": "Emma Watson",
            "biography": "English actress",
            "birthDate": "1990-04-15",
            "nationality": "British"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server.get("/actors/search?nationality=british").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let actors: Vec<Value> = response.json();
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0]["name"], "Emma Watson");

    let response = server.get("/actors/search?name=HANKS&nationality=").await;
    let actors: Vec<Value> = response.json();
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0]["name"], "Tom Hanks");

    let response = server.get("/actors/search?name=tom&nationality=british").await;
    let actors: Vec<Value> = response.json();
    assert!(actors.is_empty());

    let response = server.get("/actors/search?name=&nationality=").await;
    let actors: Vec<Value> = response.json();
    assert_eq!(actors.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_malformed_search_query_returns_error_body() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;

    for path in [
        "/movies/search?title=a&title=b",
        "/actors/search?name=a&name=b",
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["error"], "Bad Request");
    }

    Ok(())
}

#[tokio::test]
async fn test_actor_ids_replace_only_when_non_empty() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;
    let first = create_actor(&server, "Keanu Reeves").await;
    let second = create_actor(&server, "Carrie-Anne Moss").await;
    let third = create_actor(&server, "Laurence Fishburne").await;
    let movie_id = create_movie(&server, "The Matrix", "Sci-Fi").await;

    let response = server
        .patch(&format!("/movies/{}", movie_id))
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "actorIds": [first, second] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let movie: Value = response.json();
    assert_eq!(movie["actors"].as_array().unwrap().len(), 2);

    let response = server
        .patch(&format!("/movies/{}", movie_id))
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "actorIds": [] }))
        .await;
    let movie: Value = response.json();
    assert_eq!(movie["actors"].as_array().unwrap().len(), 2);

    let response = server
        .patch(&format!("/movies/{}", movie_id))
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "title": "The Matrix (1999)" }))
        .await;
    let movie: Value = response.json();
    assert_eq!(movie["actors"].as_array().unwrap().len(), 2);

    let response = server
        .patch(&format!("/movies/{}", movie_id))
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "actorIds": [third] }))
        .await;
    let movie: Value = response.json();
    let actors = movie["actors"].as_array().unwrap();
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0]["id"], third);

    Ok(())
}

#[tokio::test]
async fn test_actors_crud_api() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;

    let response = server
        .post("/actors")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({
            "name": "Emma Watson",
            "biography": "English actress",
            "birthDate": "1990-04-15T00:00:00.000Z",
            "nationality": "British"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let actor: Value = response.json();
    let actor_id = actor["id"].as_i64().unwrap();
    assert_eq!(actor["birthDate"], "1990-04-15");
    assert!(actor["movies"].as_array().unwrap().is_empty());

    let response = server
        .post("/movies")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({
            "title": "Little Women",
            "description": "Four sisters",
            "releaseYear": 2019,
            "genre": "Drama",
            "actorIds": [actor_id]
        }))
        .await;
    let movie_id = response.json::<Value>()["id"].as_i64().unwrap();

    let response = server.get(&format!("/actors/{}/movies", actor_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let actor: Value = response.json();
    assert_eq!(actor["movies"][0]["id"], movie_id);

    let response = server.get("/actors/search?name=watson").await;
    let actors: Vec<Value> = response.json();
    assert_eq!(actors.len(), 1);

    let response = server
        .patch(&format!("/actors/{}", actor_id))
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "birthDate": "not a date" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .patch(&format!("/actors/{}", actor_id))
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "nationality": "English" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["nationality"], "English");

    let response = server
        .delete(&format!("/actors/{}", actor_id))
        .add_header(AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    // The movie survives without its cast member
    let response = server.get(&format!("/movies/{}", movie_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<Value>()["actors"].as_array().unwrap().is_empty());

    let response = server.get("/actors/999999").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["message"],
        "Actor with ID 999999 not found"
    );

    Ok(())
}

#[tokio::test]
async fn test_average_rating_follows_ratings() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;
    let movie_id = create_movie(&server, "X", "Drama").await;

    let low = create_rating(&server, movie_id, 4.0).await;
    let high = create_rating(&server, movie_id, 5.0).await;
    assert_eq!(average_rating(&server, movie_id).await, 4.5);

    let response = server
        .delete(&format!("/ratings/{}", low))
        .add_header(AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(average_rating(&server, movie_id).await, 5.0);

    let response = server
        .patch(&format!("/ratings/{}", high))
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "score": 3.5, "comment": "Aged badly", "reviewerName": "Critic" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(average_rating(&server, movie_id).await, 3.5);

    let response = server
        .delete(&format!("/ratings/{}", high))
        .add_header(AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(average_rating(&server, movie_id).await, 0.0);

    Ok(())
}

#[tokio::test]
async fn test_ratings_api() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;
    let movie_id = create_movie(&server, "Titanic", "Romance").await;

    let response = server
        .post("/ratings")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({
            "score": 4.25,
            "comment": "Epic love story!",
            "reviewerName": "RomanceFan",
            "movieId": movie_id
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let rating: Value = response.json();
    let rating_id = rating["id"].as_i64().unwrap();
    assert_eq!(rating["score"].as_f64(), Some(4.3));
    assert_eq!(rating["movieId"], movie_id);
    assert_eq!(rating["movieTitle"], "Titanic");
    assert_eq!(rating["movieReleaseYear"], 2000);

    let response = server.get(&format!("/ratings/{}", rating_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["reviewerName"], "RomanceFan");

    let response = server.get(&format!("/ratings/movie/{}", movie_id)).await;
    let ratings: Vec<Value> = response.json();
    assert_eq!(ratings.len(), 1);

    let response = server.get("/ratings/movie/999999").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let ratings: Vec<Value> = response.json();
    assert!(ratings.is_empty());

    let response = server.get("/ratings").await;
    let ratings: Vec<Value> = response.json();
    assert_eq!(ratings.len(), 1);

    // Out of range score
    let response = server
        .post("/ratings")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({
            "score": 5.5,
            "comment": "",
            "reviewerName": "Fan",
            "movieId": movie_id
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Update requires every field
    let response = server
        .patch(&format!("/ratings/{}", rating_id))
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "score": 3.0 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Unknown movie
    let response = server
        .post("/ratings")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({
            "score": 3.0,
            "comment": "",
            "reviewerName": "Fan",
            "movieId": 999999
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["message"],
        "Movie with ID 999999 not found"
    );

    let ratings: Vec<Value> = server.get("/ratings").await.json();
    assert_eq!(ratings.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_deleting_movie_removes_its_ratings() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;
    let movie_id = create_movie(&server, "Doomed", "Drama").await;
    let rating_id = create_rating(&server, movie_id, 2.0).await;

    let response = server
        .delete(&format!("/movies/{}", movie_id))
        .add_header(AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&format!("/ratings/{}", rating_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let ratings: Vec<Value> = server.get("/ratings").await.json();
    assert!(ratings.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_seed_endpoint() -> Result<()> {
    let (server, _temp_dir) = setup_test_server().await?;
    create_movie(&server, "Leftover", "Drama").await;

    let response = server
        .post("/seeds")
        .add_header(AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>()["message"],
        "Database seeded successfully!"
    );

    let movies: Vec<Value> = server.get("/movies").await.json();
    assert_eq!(movies.len(), 5);
    assert!(movies.iter().all(|movie| movie["title"] != "Leftover"));

    let forrest_gump = movies
        .iter()
        .find(|movie| movie["title"] == "Forrest Gump")
        .unwrap();
    assert_eq!(forrest_gump["averageRating"].as_f64(), Some(4.3));
    assert_eq!(forrest_gump["actors"][0]["name"], "Tom Hanks");

    let actors: Vec<Value> = server.get("/actors").await.json();
    assert_eq!(actors.len(), 5);

    let ratings: Vec<Value> = server.get("/ratings").await.json();
    assert_eq!(ratings.len(), 6);

    // Seeding again replaces rather than duplicates
    let response = server
        .post("/seeds")
        .add_header(AUTHORIZATION, bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let movies: Vec<Value> = server.get("/movies").await.json();
    assert_eq!(movies.len(), 5);

    Ok(())
}
