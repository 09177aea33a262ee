//! Repository layer for persisted entities
//!
//! The ingestion pipeline only sees the `AuthorStore` and `WorkStore`
//! traits; `Repository` bundles their PostgreSQL implementations.

pub mod authors;
pub mod memory;
pub mod works;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

#[cfg(test)]
use mockall::automock;

use crate::{
    error::AppResult,
    models::{Author, Work},
};

pub use memory::MemoryRepository;

/// Keyed author storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Point lookup; `None` when the author was never stored
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Author>>;

    /// Create or replace by `author.id`
    async fn upsert(&self, author: &Author) -> AppResult<()>;
}

/// Keyed work storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WorkStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Work>>;

    /// Create or replace by `work.id`
    async fn upsert(&self, work: &Work) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub works: works::WorksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            works: works::WorksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
