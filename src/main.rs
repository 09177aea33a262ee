//! Open Library dump loader
//!
//! Loads the authors dump, then the works dump, into the configured store.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openlibrary_loader::{
    config::{AppConfig, StorageBackend},
    repository::{AuthorStore, MemoryRepository, Repository, WorkStore},
    services::IngestService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("openlibrary_loader={}", config.logging.level).into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Open Library loader v{}", env!("CARGO_PKG_VERSION"));

    let mut repository = None;
    let (authors, works): (Arc<dyn AuthorStore>, Arc<dyn WorkStore>) = match config.storage.backend {
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .connect(&config.database.url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            let repo = Repository::new(pool);
            repo.migrate().await.context("Failed to run database migrations")?;
            tracing::info!("Database migrations completed");

            let stores = (
                Arc::new(repo.authors.clone()) as Arc<dyn AuthorStore>,
                Arc::new(repo.works.clone()) as Arc<dyn WorkStore>,
            );
            repository = Some(repo);
            stores
        }
        StorageBackend::Memory => {
            tracing::info!("Dry run: entities are kept in memory only");
            let memory = Arc::new(MemoryRepository::new());
            (
                memory.clone() as Arc<dyn AuthorStore>,
                memory as Arc<dyn WorkStore>,
            )
        }
    };

    let service = IngestService::new(authors, works)
        .with_progress_interval(config.ingest.progress_interval);

    // Works resolve author names from stored authors, so authors go first
    if config.ingest.authors {
        service.ingest_authors(&config.dump.authors).await?;
    }
    if config.ingest.works {
        service.ingest_works(&config.dump.works).await?;
    }

    if let Some(repo) = repository {
        tracing::info!(
            "Store now holds {} authors and {} works",
            repo.authors.count().await?,
            repo.works.count().await?
        );
    }

    Ok(())
}
