//! Infrastructure Layer
//!
//! Database implementation and the in-memory fallback.

pub mod memory;
pub mod postgres;

pub use memory::MemorySnippetRepository;
pub use postgres::PgSnippetRepository;
