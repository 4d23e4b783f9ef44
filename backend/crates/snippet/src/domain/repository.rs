//! Repository Traits

use kernel::id::SnippetId;

use crate::domain::entity::{NewSnippet, Snippet};
use crate::error::SnippetResult;

/// Snippet repository trait
///
/// Expired snippets are invisible to every read.
#[trait_variant::make(SnippetRepository: Send)]
pub trait LocalSnippetRepository {
    /// Store a snippet and return its identity
    async fn insert(&self, snippet: &NewSnippet) -> SnippetResult<SnippetId>;

    /// Fails with `NotFound` for unknown or expired snippets
    async fn get(&self, id: SnippetId) -> SnippetResult<Snippet>;

    /// Most recent live snippets, newest first
    async fn latest(&self, limit: usize) -> SnippetResult<Vec<Snippet>>;
}
