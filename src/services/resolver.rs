//! Author reference resolution for works

use std::sync::Arc;

use crate::{error::AppResult, models::UNKNOWN_AUTHOR, repository::AuthorStore};

/// Names resolved for one work, aligned with its author ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    pub names: Vec<String>,
    pub unresolved: usize,
}

/// Turns author ids into display names through point lookups on the
/// author store.
#[derive(Clone)]
pub struct AuthorNameResolver {
    authors: Arc<dyn AuthorStore>,
}

impl AuthorNameResolver {
    pub fn new(authors: Arc<dyn AuthorStore>) -> Self {
        Self { authors }
    }

    /// Resolve each id in order; ids with no stored author get the
    /// unknown-author name
    pub async fn resolve(&self, author_ids: &[String]) -> AppResult<ResolvedNames> {
        let mut names = Vec::with_capacity(author_ids.len());
        let mut unresolved = 0;

        for id in author_ids {
            match self.authors.find_by_id(id).await? {
                Some(author) => names.push(author.name),
                None => {
                    tracing::debug!("Author {} not found, using \"{}\"", id, UNKNOWN_AUTHOR);
                    unresolved += 1;
                    names.push(UNKNOWN_AUTHOR.to_string());
                }
            }
        }

        Ok(ResolvedNames { names, unresolved })
    }
}
