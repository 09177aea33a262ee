//! In-memory store used for dry runs

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AuthorStore, WorkStore};
use crate::{
    error::AppResult,
    models::{Author, Work},
};

/// Both entity kinds kept in process memory, keyed by id.
#[derive(Default)]
pub struct MemoryRepository {
    authors: RwLock<HashMap<String, Author>>,
    works: RwLock<HashMap<String, Work>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn author_count(&self) -> usize {
        self.authors.read().await.len()
    }

    pub async fn work_count(&self) -> usize {
        self.works.read().await.len()
    }

    /// All authors, sorted by id
    pub async fn authors(&self) -> Vec<Author> {
        let mut authors: Vec<Author> = self.authors.read().await.values().cloned().collect();
        authors.sort_by(|a, b| a.id.cmp(&b.id));
        authors
    }

    /// All works, sorted by id
    pub async fn works(&self) -> Vec<Work> {
        let mut works: Vec<Work> = self.works.read().await.values().cloned().collect();
        works.sort_by(|a, b| a.id.cmp(&b.id));
        works
    }
}

#[async_trait]
impl AuthorStore for MemoryRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        Ok(self.authors.read().await.get(id).cloned())
    }

    async fn upsert(&self, author: &Author) -> AppResult<()> {
        self.authors
            .write()
            .await
            .insert(author.id.clone(), author.clone());
        Ok(())
    }
}

#[async_trait]
impl WorkStore for MemoryRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Work>> {
        Ok(self.works.read().await.get(id).cloned())
    }

    async fn upsert(&self, work: &Work) -> AppResult<()> {
        self.works.write().await.insert(work.id.clone(), work.clone());
        Ok(())
    }
}
