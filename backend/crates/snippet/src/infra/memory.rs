//! In-memory Snippet Repository
//!
//! Used when no database is configured, and by the tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::SnippetId;
use tokio::sync::RwLock;

use crate::domain::entity::{NewSnippet, Snippet};
use crate::domain::repository::SnippetRepository;
use crate::error::{SnippetError, SnippetResult};

#[derive(Debug, Default)]
struct SnippetTable {
    next_id: i64,
    rows: BTreeMap<SnippetId, Snippet>,
}

#[derive(Debug, Clone, Default)]
pub struct MemorySnippetRepository {
    table: Arc<RwLock<SnippetTable>>,
}

impl MemorySnippetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnippetRepository for MemorySnippetRepository {
    async fn insert(&self, snippet: &NewSnippet) -> SnippetResult<SnippetId> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let id = SnippetId::new(table.next_id);

        let created_at = Utc::now();
        table.rows.insert(
            id,
            Snippet {
                id,
                title: snippet.title.clone(),
                content: snippet.content.clone(),
                created_at,
                expires_at: snippet.expires_at(created_at),
            },
        );

        Ok(id)
    }

    async fn get(&self, id: SnippetId) -> SnippetResult<Snippet> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .filter(|s| !s.is_expired_at(Utc::now()))
            .cloned()
            .ok_or(SnippetError::NotFound)
    }

    async fn latest(&self, limit: usize) -> SnippetResult<Vec<Snippet>> {
        let now = Utc::now();
        let table = self.table.read().await;
        // ids grow with insertion time
        Ok(table
            .rows
            .values()
            .rev()
            .filter(|s| !s.is_expired_at(now))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_snippet(title: &str) -> NewSnippet {
        NewSnippet {
            title: title.into(),
            content: "content".into(),
            expires_days: 1,
        }
    }

    #[tokio::test]
    async fn test_expired_snippets_are_invisible() {
        let repo = MemorySnippetRepository::new();
        let stale = repo.insert(&new_snippet("stale")).await.unwrap();
        let fresh = repo.insert(&new_snippet("fresh")).await.unwrap();

        {
            let mut table = repo.table.write().await;
            let row = table.rows.get_mut(&stale).unwrap();
            row.expires_at = Utc::now() - Duration::seconds(1);
        }

        assert!(matches!(
            repo.get(stale).await,
            Err(SnippetError::NotFound)
        ));
        assert_eq!(repo.get(fresh).await.unwrap().title, "fresh");

        let latest = repo.latest(10).await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].id, fresh);
    }
}
