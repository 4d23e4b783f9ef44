//! Show Snippet Use Case

use std::sync::Arc;

use kernel::id::SnippetId;

use crate::domain::entity::Snippet;
use crate::domain::repository::SnippetRepository;
use crate::error::{SnippetError, SnippetResult};

pub struct ShowSnippetUseCase<N> {
    snippets: Arc<N>,
}

impl<N> ShowSnippetUseCase<N>
where
    N: SnippetRepository + Sync,
{
    pub fn new(snippets: Arc<N>) -> Self {
        Self { snippets }
    }

    /// Resolve the raw path segment. Anything but a positive integer is `NotFound`.
    pub async fn execute(&self, raw_id: &str) -> SnippetResult<Snippet> {
        let id = raw_id
            .parse::<SnippetId>()
            .ok()
            .filter(SnippetId::is_valid)
            .ok_or(SnippetError::NotFound)?;

        self.snippets.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::NewSnippet;
    use crate::infra::memory::MemorySnippetRepository;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_only_positive_integers_resolve() {
        let repo = Arc::new(MemorySnippetRepository::new());
        repo.insert(&NewSnippet {
            title: "title".into(),
            content: "content".into(),
            expires_days: 1,
        })
        .await
        .unwrap();

        let use_case = ShowSnippetUseCase::new(repo);
        let snippet = assert_ok!(use_case.execute("1").await);
        assert_eq!(snippet.title, "title");

        for raw in ["0", "-1", "abc", "1.5", "", "99"] {
            let err = assert_err!(use_case.execute(raw).await);
            assert!(matches!(err, SnippetError::NotFound), "{raw}");
        }
    }
}
