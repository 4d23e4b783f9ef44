//! Infrastructure Layer
//!
//! Database implementations and the in-memory fallback.

pub mod memory;
pub mod postgres;

pub use memory::{MemorySessionStore, MemoryUserRepository};
pub use postgres::{PgSessionStore, PgUserRepository};
