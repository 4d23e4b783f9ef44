//! Domain Layer
//!
//! Contains the snippet entity and the repository trait.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::{NewSnippet, Snippet};
pub use kernel::id::SnippetId;
pub use repository::SnippetRepository;
