pub mod app;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

use crate::database::{connection::*, migrations::Migrator};
use crate::services::SeedService;
use anyhow::Result;
use sea_orm_migration::MigratorTrait;
use tracing::info;

/// Runtime settings for `serve`
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_path: String,
    pub cors_origin: Option<String>,
    pub api_secret: String,
}

pub async fn start_server(config: ServerConfig) -> Result<()> {
    let database_url = get_database_url(Some(&config.database_path));
    let db = establish_connection(&database_url).await?;

    setup_database(&db).await?;

    let app = app::create_app(db, config.cors_origin.as_deref(), &config.api_secret).await?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  /health                     - Health check");
    info!("  /api-docs/openapi.json      - OpenAPI document");
    info!("  /movies, /movies/search     - Movie catalog");
    info!("  /actors, /actors/search     - Actor registry");
    info!("  /ratings, /ratings/movie/*  - Ratings");
    info!("  /seeds                      - Load sample data (POST)");
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}

/// Migrates the database if needed and loads the sample catalog.
pub async fn seed_database(database_path: &str) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;
    setup_database(&db).await?;

    let summary = SeedService::new(db).seed().await?;
    info!(
        "Seeded {} with {} movies, {} actors and {} ratings",
        database_path, summary.movies, summary.actors, summary.ratings
    );
    Ok(())
}
