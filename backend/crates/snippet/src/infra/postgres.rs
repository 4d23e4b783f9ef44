//! PostgreSQL Snippet Repository

use chrono::{DateTime, Utc};
use kernel::id::SnippetId;
use sqlx::PgPool;

use crate::domain::entity::{NewSnippet, Snippet};
use crate::domain::repository::SnippetRepository;
use crate::error::{SnippetError, SnippetResult};

/// PostgreSQL-backed snippet repository
#[derive(Clone)]
pub struct PgSnippetRepository {
    pool: PgPool,
}

impl PgSnippetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SnippetRepository for PgSnippetRepository {
    async fn insert(&self, snippet: &NewSnippet) -> SnippetResult<SnippetId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO snippets (title, content, created_at, expires_at)
            VALUES ($1, $2, NOW(), NOW() + make_interval(days => $3))
            RETURNING id
            "#,
        )
        .bind(&snippet.title)
        .bind(&snippet.content)
        .bind(snippet.expires_days)
        .fetch_one(&self.pool)
        .await?;

        Ok(SnippetId::new(id))
    }

    async fn get(&self, id: SnippetId) -> SnippetResult<Snippet> {
        let row = sqlx::query_as::<_, SnippetRow>(
            r#"
            SELECT id, title, content, created_at, expires_at
            FROM snippets
            WHERE expires_at > NOW() AND id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Snippet::from).ok_or(SnippetError::NotFound)
    }

    async fn latest(&self, limit: usize) -> SnippetResult<Vec<Snippet>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, SnippetRow>(
            r#"
            SELECT id, title, content, created_at, expires_at
            FROM snippets
            WHERE expires_at > NOW()
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Snippet::from).collect())
    }
}

// ============================================================================
// Database Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct SnippetRow {
    id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SnippetRow> for Snippet {
    fn from(row: SnippetRow) -> Self {
        Snippet {
            id: SnippetId::new(row.id),
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}
