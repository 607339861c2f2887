use std::sync::Arc;

use roster_api::config::Config;
use roster_api::db::{self, InMemoryPlayerRepository, PlayerRepository, SqlitePlayerRepository};
use roster_api::service::PlayerDirectory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting roster api server...");

    if let Err(err) = run().await {
        tracing::error!("Server stopped: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoxError> {
    let config = Config::from_env()?;

    let repo: Arc<dyn PlayerRepository> = if config.uses_in_memory_store() {
        tracing::warn!("Using in-memory store, players are lost on shutdown.");
        Arc::new(InMemoryPlayerRepository::new())
    } else {
        let pool = db::connect(&config.database_url).await?;
        tracing::info!("Database connection established.");
        Arc::new(SqlitePlayerRepository::new(pool))
    };

    let directory = PlayerDirectory::new(repo).with_email_updates(config.allow_email_update);
    let app = roster_api::app(directory);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
