use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use movie_catalog::server::{self, MigrateDirection, ServerConfig};

const DEFAULT_DATABASE: &str = "movie-catalog.db";

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[clap(short, long, env = "PORT", default_value = "3001")]
        port: u16,
        #[clap(short, long, env = "DATABASE_PATH", default_value = DEFAULT_DATABASE)]
        database: String,
        #[clap(long, env = "CORS_ORIGIN")]
        cors_origin: Option<String>,
        /// Token mutating requests must present as `Authorization: Bearer <token>`
        #[clap(
            long,
            env = "API_SECRET",
            default_value = "your-secret-token-here",
            hide_env_values = true
        )]
        api_secret: String,
    },
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    /// Replace the catalog with the sample movies, actors and ratings
    Seed {
        #[clap(short, long, env = "DATABASE_PATH", default_value = DEFAULT_DATABASE)]
        database: String,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long, env = "DATABASE_PATH", default_value = DEFAULT_DATABASE)]
        database: String,
    },
    Migrate {
        #[clap(subcommand)]
        direction: MigrateDirection,
        #[clap(short, long, env = "DATABASE_PATH", default_value = DEFAULT_DATABASE)]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Serve {
            port,
            database,
            cors_origin,
            api_secret,
        } => {
            info!("Starting server on port {}", port);
            server::start_server(ServerConfig {
                port,
                database_path: database,
                cors_origin,
                api_secret,
            })
            .await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                info!("Initializing database: {}", database);
                server::migrate_database(&database, MigrateDirection::Up).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                info!("Running database migration: {:?}", direction);
                server::migrate_database(&database, direction).await?;
            }
        },
        Commands::Seed { database } => {
            info!("Seeding database: {}", database);
            server::seed_database(&database).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let filter = match log_level.as_deref() {
        Some(level) => {
            let level = match level.to_lowercase().as_str() {
                "trace" => Level::TRACE,
                "debug" => Level::DEBUG,
                "info" => Level::INFO,
                "warn" => Level::WARN,
                "error" => Level::ERROR,
                _ => Level::INFO,
            };
            EnvFilter::new(format!("sqlx=warn,{}", level))
        }
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("sqlx=warn,info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .init();
}
