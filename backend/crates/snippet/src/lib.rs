//! Snippet Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Snippet entity, repository trait
//! - `application/` - Create, show and latest use cases
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, form, views, router
//!
//! Snippets expire after 1, 7 or 365 days and are invisible afterwards.
//! Creating one requires a signed-in user; reading does not.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{SnippetError, SnippetResult};
pub use infra::{MemorySnippetRepository, PgSnippetRepository};
pub use presentation::{SnippetAppState, snippet_router};
