use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::ConnectOptions;
use settings::Database;

mod seed;
mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spese={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let server = settings.server;
    tracing::info!("Using {:?} database", server.database);
    let db = match parse_database(&server.database).await {
        Ok(db) => db,
        Err(err) => {
            tracing::error!("failed to initialize database: {err}");
            return Err(err);
        }
    };

    let engine = engine::Engine::builder().database(db).build().await?;

    if settings.app.seed_sample_data {
        let today = chrono::Local::now().date_naive();
        match seed::seed_if_empty(&engine, today).await {
            Ok(0) => tracing::info!("Database already contains expenses, skipping sample data"),
            Ok(count) => tracing::info!("Loaded {count} sample expenses"),
            Err(err) => tracing::error!("failed to load sample data: {err}"),
        }
    }

    let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };

    server::run_with_listener(engine, listener).await?;
    Ok(())
}

/// The in-memory database exists only as long as its connection, so the pool
/// keeps exactly one that is never reaped.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 10);

fn connect_options(config: &Database) -> ConnectOptions {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let mut options = ConnectOptions::new(url);
    if *config == Database::Memory {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(MEMORY_CONNECTION_LIFETIME)
            .max_lifetime(MEMORY_CONNECTION_LIFETIME);
    }
    options
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(connect_options(config)).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
