//! Create Snippet Use Case

use std::sync::Arc;

use kernel::id::SnippetId;

use crate::domain::entity::NewSnippet;
use crate::domain::repository::SnippetRepository;
use crate::error::SnippetResult;

pub struct CreateSnippetUseCase<N> {
    snippets: Arc<N>,
}

impl<N> CreateSnippetUseCase<N>
where
    N: SnippetRepository + Sync,
{
    pub fn new(snippets: Arc<N>) -> Self {
        Self { snippets }
    }

    /// Input must already be validated
    pub async fn execute(&self, snippet: NewSnippet) -> SnippetResult<SnippetId> {
        let id = self.snippets.insert(&snippet).await?;

        tracing::info!(
            snippet_id = %id,
            expires_days = snippet.expires_days,
            "Snippet created"
        );

        Ok(id)
    }
}
