//! Latest Snippets Use Case

use std::sync::Arc;

use crate::domain::entity::Snippet;
use crate::domain::repository::SnippetRepository;
use crate::error::SnippetResult;

/// Snippets shown on the home page
pub const LATEST_LIMIT: usize = 10;

pub struct LatestSnippetsUseCase<N> {
    snippets: Arc<N>,
}

impl<N> LatestSnippetsUseCase<N>
where
    N: SnippetRepository + Sync,
{
    pub fn new(snippets: Arc<N>) -> Self {
        Self { snippets }
    }

    pub async fn execute(&self) -> SnippetResult<Vec<Snippet>> {
        self.snippets.latest(LATEST_LIMIT).await
    }
}
