//! Works repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::WorkStore;
use crate::{error::AppResult, models::Work};

#[derive(Clone)]
pub struct WorksRepository {
    pool: Pool<Postgres>,
}

impl WorksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Number of stored works
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM works")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl WorkStore for WorksRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Work>> {
        let work = sqlx::query_as::<_, Work>(
            r#"
            SELECT id, name, description, published_date,
                   cover_ids, author_ids, author_names
            FROM works
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(work)
    }

    async fn upsert(&self, work: &Work) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO works (id, name, description, published_date,
                               cover_ids, author_ids, author_names)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                description = EXCLUDED.description,
                published_date = EXCLUDED.published_date,
                cover_ids = EXCLUDED.cover_ids,
                author_ids = EXCLUDED.author_ids,
                author_names = EXCLUDED.author_names
            "#,
        )
        .bind(&work.id)
        .bind(&work.name)
        .bind(&work.description)
        .bind(work.published_date)
        .bind(&work.cover_ids)
        .bind(&work.author_ids)
        .bind(&work.author_names)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
