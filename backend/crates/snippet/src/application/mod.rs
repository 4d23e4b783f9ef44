//! Application Layer
//!
//! Use cases over the snippet repository.

pub mod create_snippet;
pub mod latest_snippets;
pub mod show_snippet;

// Re-exports
pub use create_snippet::CreateSnippetUseCase;
pub use latest_snippets::{LATEST_LIMIT, LatestSnippetsUseCase};
pub use show_snippet::ShowSnippetUseCase;
